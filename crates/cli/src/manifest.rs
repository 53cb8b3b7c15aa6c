//! JSON manifest seeding the entity store before a replay.
//!
//! Pool and token registration happen on-chain before the first reserve
//! update; the manifest stands in for that bootstrap so a replay starts
//! from registered records instead of placeholders.

use amm_index_domain::ordering::sort_tokens;
use amm_index_domain::{Bundle, Exchange, ExchangePair, ExchangeToken, Pair, Token};
use amm_index_store::EntityStore;
use serde::Deserialize;

/// Seed data for exchanges, tokens and pools.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub exchanges: Vec<ExchangeSeed>,
    #[serde(default)]
    pub tokens: Vec<TokenSeed>,
    #[serde(default)]
    pub pools: Vec<PoolSeed>,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeSeed {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenSeed {
    pub address: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub decimals: u8,
}

#[derive(Debug, Deserialize)]
pub struct PoolSeed {
    pub address: String,
    pub exchange: String,
    pub token_a: String,
    pub token_b: String,
}

impl Manifest {
    /// Registers every seeded record, get-or-create style: existing
    /// records are left untouched.
    pub fn seed(&self, store: &mut EntityStore) {
        for exchange in &self.exchanges {
            if !store.load_exchange(&exchange.address).exists {
                store.save_exchange(Exchange::placeholder(&exchange.address));
            }
            if !store.load_bundle(&exchange.address).exists {
                store.save_bundle(Bundle::placeholder(&exchange.address));
            }
        }

        for token in &self.tokens {
            if !store.load_token(&token.address).exists {
                store.save_token(Token::new(
                    &token.address,
                    &token.symbol,
                    &token.name,
                    token.decimals,
                ));
            }
        }

        for pool in &self.pools {
            let (token0, token1) = sort_tokens(&pool.token_a, &pool.token_b);

            for token in [token0, token1] {
                if !store.load_exchange_token(token, &pool.exchange).exists {
                    store.save_exchange_token(ExchangeToken::new(token, &pool.exchange));
                }
            }
            if !store.load_pair(token0, token1).exists {
                store.save_pair(Pair::placeholder(token0, token1));
            }
            if !store.load_exchange_pair(&pool.address).exists {
                let mut record = ExchangePair::placeholder(&pool.address);
                record.exchange = pool.exchange.clone();
                record.token0 = token0.to_string();
                record.token1 = token1.to_string();
                store.save_exchange_pair(record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_seeds_canonical_pool_order() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "exchanges": [{ "address": "0xfac" }],
                "tokens": [
                    { "address": "0xbb", "symbol": "BBB", "decimals": 6 },
                    { "address": "0xaa", "symbol": "AAA", "decimals": 18 }
                ],
                "pools": [
                    {
                        "address": "0xpool",
                        "exchange": "0xfac",
                        "token_a": "0xbb",
                        "token_b": "0xaa"
                    }
                ]
            }"#,
        )
        .unwrap();

        let mut store = EntityStore::new();
        manifest.seed(&mut store);

        // token_a/token_b order in the manifest does not matter
        let pool = store.load_exchange_pair("0xpool");
        assert!(pool.exists);
        assert_eq!(pool.entity.token0, "0xaa");
        assert_eq!(pool.entity.token1, "0xbb");
        assert!(store.find_exchange_pair("0xaa", "0xbb", "0xfac").exists);
        assert!(store.load_bundle("0xfac").exists);
    }

    #[test]
    fn test_seed_does_not_clobber_existing_records() {
        let manifest: Manifest = serde_json::from_str(
            r#"{ "tokens": [{ "address": "0xaa", "symbol": "NEW", "decimals": 6 }] }"#,
        )
        .unwrap();

        let mut store = EntityStore::new();
        store.save_token(Token::new("0xaa", "OLD", "Old Token", 18));
        manifest.seed(&mut store);

        assert_eq!(store.load_token("0xaa").entity.symbol, "OLD");
    }
}
