//! Tracked-liquidity calculator.

use amm_index_domain::{ExchangeToken, PricingConfig};
use amm_index_store::EntityStore;
use rust_decimal::Decimal;
use tracing::warn;

/// USD value of a pool's reserves that counts toward tracked global
/// liquidity.
///
/// Both sides whitelisted: sum of both reserve values. One side
/// whitelisted: double that side, approximating the pool's total value
/// as if the untrusted side were priced symmetrically. Neither: 0.
/// Unlike tracked volume there is no untracked-pair exclusion and no
/// minimum floor.
#[must_use]
pub fn tracked_liquidity_usd(
    store: &EntityStore,
    config: &PricingConfig,
    reserve0: Decimal,
    ex_token0: &ExchangeToken,
    reserve1: Decimal,
    ex_token1: &ExchangeToken,
) -> Decimal {
    let bundle = store.load_bundle(&ex_token0.exchange);
    if !bundle.exists {
        warn!(
            exchange = %ex_token0.exchange,
            "bundle missing, tracked liquidity degrades to zero"
        );
    }
    let price0 = ex_token0.eth_price * bundle.entity.value;
    let price1 = ex_token1.eth_price * bundle.entity.value;

    let whitelisted0 = config.is_whitelisted(&ex_token0.token);
    let whitelisted1 = config.is_whitelisted(&ex_token1.token);

    match (whitelisted0, whitelisted1) {
        (true, true) => reserve0 * price0 + reserve1 * price1,
        (true, false) => reserve0 * price0 * Decimal::TWO,
        (false, true) => reserve1 * price1 * Decimal::TWO,
        (false, false) => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_index_domain::Bundle;
    use rust_decimal_macros::dec;

    const EXCHANGE: &str = "0xfac";
    const OTHER: &str = "0xffffffffffffffffffffffffffffffffffffffff";

    fn store_with_rate(eth_usd: Decimal) -> EntityStore {
        let mut store = EntityStore::new();
        let mut bundle = Bundle::placeholder(EXCHANGE);
        bundle.value = eth_usd;
        store.save_bundle(bundle);
        store
    }

    fn ex_token(address: &str, eth_price: Decimal) -> ExchangeToken {
        let mut record = ExchangeToken::new(address, EXCHANGE);
        record.eth_price = eth_price;
        record
    }

    #[test]
    fn test_both_whitelisted_sums_both_sides() {
        let store = store_with_rate(dec!(2000));
        let config = PricingConfig::mainnet();

        let token0 = ex_token(&config.dai, dec!(0.0005));
        let token1 = ex_token(&config.weth, dec!(1));

        let tracked = tracked_liquidity_usd(
            &store,
            &config,
            dec!(1000),
            &token0,
            dec!(2),
            &token1,
        );
        // 1000 * $1 + 2 * $2000 = 5000
        assert_eq!(tracked, dec!(5000));
    }

    #[test]
    fn test_single_whitelisted_side_is_doubled() {
        let store = store_with_rate(dec!(2000));
        let config = PricingConfig::mainnet();

        let token0 = ex_token(OTHER, dec!(0.5));
        let token1 = ex_token(&config.weth, dec!(1));

        let tracked = tracked_liquidity_usd(
            &store,
            &config,
            dec!(999999),
            &token0,
            dec!(3),
            &token1,
        );
        // 3 * $2000 * 2 = 12000, untrusted side ignored
        assert_eq!(tracked, dec!(12000));
    }

    #[test]
    fn test_neither_whitelisted_counts_zero() {
        let store = store_with_rate(dec!(2000));
        let config = PricingConfig::mainnet();

        let token0 = ex_token("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee", dec!(1));
        let token1 = ex_token(OTHER, dec!(1));

        let tracked = tracked_liquidity_usd(
            &store,
            &config,
            dec!(100),
            &token0,
            dec!(100),
            &token1,
        );
        assert_eq!(tracked, Decimal::ZERO);
    }

    #[test]
    fn test_no_floor_applies() {
        let store = store_with_rate(dec!(2000));
        let config = PricingConfig::mainnet();

        // tiny pool still counts, unlike tracked volume
        let token0 = ex_token(&config.dai, dec!(0.0005));
        let token1 = ex_token(&config.weth, dec!(1));

        let tracked = tracked_liquidity_usd(
            &store,
            &config,
            dec!(1),
            &token0,
            dec!(0.0005),
            &token1,
        );
        assert_eq!(tracked, dec!(2));
    }
}
