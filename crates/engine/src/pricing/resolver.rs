//! Whitelist-anchored token price resolver.

use amm_index_domain::ordering::sort_tokens;
use amm_index_domain::{ExchangeToken, PricingConfig};
use amm_index_store::EntityStore;
use rust_decimal::Decimal;
use tracing::warn;

/// Derived ETH price of an exchange-scoped token.
///
/// Walks the ordered anchor whitelist and returns the price implied by
/// the FIRST anchor pool that exists and clears the minimum ETH
/// liquidity threshold. This is a first-match search, not a best-match
/// one: whitelist order encodes anchor priority, and a qualifying pool
/// later in the list never competes with an earlier one. Returns 0 when
/// the whitelist is exhausted.
#[must_use]
pub fn eth_per_exchange_token(
    store: &EntityStore,
    config: &PricingConfig,
    ex_token: &ExchangeToken,
) -> Decimal {
    if ex_token.token == config.weth {
        return Decimal::ONE;
    }

    for anchor in &config.whitelist {
        if *anchor == ex_token.token {
            continue;
        }

        let (token0, token1) = sort_tokens(&ex_token.token, anchor);
        let pool = store.find_exchange_pair(token0, token1, &ex_token.exchange);
        if !pool.exists {
            continue;
        }
        let pool = pool.entity;

        if pool.token0 == ex_token.token
            && pool.reserve_eth > config.minimum_liquidity_threshold_eth
        {
            let counter = store.load_exchange_token(&pool.token1, &pool.exchange);
            if !counter.exists {
                warn!(
                    token = %pool.token1,
                    exchange = %pool.exchange,
                    "anchor exchange token missing, derived price degrades to zero"
                );
            }
            // anchor units per token, times ETH per anchor unit
            return pool.token1_price * counter.entity.eth_price;
        }
        if pool.token1 == ex_token.token
            && pool.reserve_eth > config.minimum_liquidity_threshold_eth
        {
            let counter = store.load_exchange_token(&pool.token0, &pool.exchange);
            if !counter.exists {
                warn!(
                    token = %pool.token0,
                    exchange = %pool.exchange,
                    "anchor exchange token missing, derived price degrades to zero"
                );
            }
            return pool.token0_price * counter.entity.eth_price;
        }
    }

    Decimal::ZERO
}

/// Derived USD price of an exchange-scoped token.
///
/// WETH maps to the ETH/USD rate directly; everything else is the
/// token's derived ETH price times the rate.
#[must_use]
pub fn usd_per_exchange_token(
    config: &PricingConfig,
    ex_token: &ExchangeToken,
    eth_usd: Decimal,
) -> Decimal {
    if ex_token.token == config.weth {
        eth_usd
    } else {
        ex_token.eth_price * eth_usd
    }
}
