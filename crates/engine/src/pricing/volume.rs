//! Tracked-volume calculator.

use amm_index_domain::{ExchangePair, ExchangeToken, PricingConfig};
use amm_index_store::EntityStore;
use rust_decimal::Decimal;
use tracing::warn;

/// USD value of a trade that counts toward tracked global volume.
///
/// Pools in the untracked set contribute nothing. Whitelisted tokens
/// anchor trusted USD pricing; a non-whitelisted side's stated amount is
/// ignored and only the whitelisted side is counted. Pools whose
/// whitelisted liquidity sits under the USD floor contribute nothing:
/// their derived prices are too thin to trust.
#[must_use]
pub fn tracked_volume_usd(
    store: &EntityStore,
    config: &PricingConfig,
    amount0: Decimal,
    ex_token0: &ExchangeToken,
    amount1: Decimal,
    ex_token1: &ExchangeToken,
    ex_pair: &ExchangePair,
) -> Decimal {
    // usually rebasing tokens whose reported amounts drift
    if config.untracked_pairs.contains(&ex_pair.address) {
        return Decimal::ZERO;
    }

    let bundle = store.load_bundle(&ex_pair.exchange);
    if !bundle.exists {
        warn!(
            exchange = %ex_pair.exchange,
            "bundle missing, tracked volume degrades to zero"
        );
    }
    let price0 = ex_token0.eth_price * bundle.entity.value;
    let price1 = ex_token1.eth_price * bundle.entity.value;

    let whitelisted0 = config.is_whitelisted(&ex_token0.token);
    let whitelisted1 = config.is_whitelisted(&ex_token1.token);

    let reserve0_usd = ex_pair.reserve0 * price0;
    let reserve1_usd = ex_pair.reserve1 * price1;
    let threshold = config.minimum_usd_threshold_new_pairs;

    if whitelisted0 && whitelisted1 && reserve0_usd + reserve1_usd < threshold {
        return Decimal::ZERO;
    }
    if whitelisted0 && !whitelisted1 && reserve0_usd * Decimal::TWO < threshold {
        return Decimal::ZERO;
    }
    if !whitelisted0 && whitelisted1 && reserve1_usd * Decimal::TWO < threshold {
        return Decimal::ZERO;
    }

    match (whitelisted0, whitelisted1) {
        // both sides trusted, average the two values
        (true, true) => (amount0 * price0 + amount1 * price1) / Decimal::TWO,
        // full value of the whitelisted side only
        (true, false) => amount0 * price0,
        (false, true) => amount1 * price1,
        (false, false) => Decimal::ZERO,
    }
}
