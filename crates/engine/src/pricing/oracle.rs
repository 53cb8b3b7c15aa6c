//! ETH/USD oracle over the stablecoin reference pools.

use amm_index_domain::PricingConfig;
use amm_index_store::EntityStore;
use rust_decimal::Decimal;

/// Current ETH price in USD, as a reserve-weighted average of the
/// DAI/WETH, USDC/WETH and WETH/USDT reference pairs.
///
/// Case order matters and the first match wins:
/// 1. all three pairs exist: weight each by its stablecoin-side reserve
///    (reserve1 for DAI and USDC, reserve0 for USDT);
/// 2. DAI and USDC exist: same weighting over those two;
/// 3. only USDC exists: its token0 price is the rate;
/// 4. otherwise 0.
///
/// Other combinations (DAI-only, USDT-only) deliberately degrade to 0:
/// the oracle reports no rate until at least the USDC pair is indexed.
#[must_use]
pub fn eth_price_in_usd(store: &EntityStore, config: &PricingConfig) -> Decimal {
    let (dai0, dai1) = config.dai_weth_pair();
    let (usdc0, usdc1) = config.usdc_weth_pair();
    let (usdt0, usdt1) = config.usdt_weth_pair();

    let dai_pair = store.load_pair(dai0, dai1);
    let usdc_pair = store.load_pair(usdc0, usdc1);
    let usdt_pair = store.load_pair(usdt0, usdt1);

    if dai_pair.exists && usdc_pair.exists && usdt_pair.exists {
        let dai = dai_pair.entity;
        let usdc = usdc_pair.entity;
        let usdt = usdt_pair.entity;

        let total_liquidity_stables = dai.reserve1 + usdc.reserve1 + usdt.reserve0;
        if total_liquidity_stables.is_zero() {
            return Decimal::ZERO;
        }
        let dai_weight = dai.reserve1 / total_liquidity_stables;
        let usdc_weight = usdc.reserve1 / total_liquidity_stables;
        let usdt_weight = usdt.reserve0 / total_liquidity_stables;

        dai.token0_price * dai_weight
            + usdc.token0_price * usdc_weight
            + usdt.token1_price * usdt_weight
    } else if dai_pair.exists && usdc_pair.exists {
        let dai = dai_pair.entity;
        let usdc = usdc_pair.entity;

        let total_liquidity_eth = dai.reserve1 + usdc.reserve1;
        if total_liquidity_eth.is_zero() {
            return Decimal::ZERO;
        }
        let dai_weight = dai.reserve1 / total_liquidity_eth;
        let usdc_weight = usdc.reserve1 / total_liquidity_eth;

        dai.token0_price * dai_weight + usdc.token0_price * usdc_weight
    } else if usdc_pair.exists {
        usdc_pair.entity.token0_price
    } else {
        Decimal::ZERO
    }
}
