//! Static pricing configuration.
//!
//! The anchor whitelist, the stablecoin reference pairs, the untracked
//! pool set, and the two liquidity thresholds are process-wide immutable
//! configuration injected at startup. Whitelist order is load-bearing:
//! the price resolver returns the first anchor whose pool clears the
//! liquidity threshold, so the list encodes anchor priority.

use rust_decimal::Decimal;
use std::collections::HashSet;

/// Immutable pricing configuration for one deployment.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Wrapped-ETH token address.
    pub weth: String,
    /// DAI token address.
    pub dai: String,
    /// USDC token address.
    pub usdc: String,
    /// USDT token address.
    pub usdt: String,
    /// Ordered anchor-token whitelist; earlier entries win.
    pub whitelist: Vec<String>,
    /// Pools excluded from tracked volume, usually rebasing tokens.
    pub untracked_pairs: HashSet<String>,
    /// Minimum pool liquidity in ETH for price discovery.
    pub minimum_liquidity_threshold_eth: Decimal,
    /// Minimum pool liquidity in USD for tracked volume.
    pub minimum_usd_threshold_new_pairs: Decimal,
}

impl PricingConfig {
    /// Ethereum-mainnet constants.
    #[must_use]
    pub fn mainnet() -> Self {
        let weth = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string();
        let dai = "0x6b175474e89094c44da98b954eedeac495271d0f".to_string();
        let usdc = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string();
        let usdt = "0xdac17f958d2ee523a2206206994597c13d831ec7".to_string();

        let whitelist = vec![
            weth.clone(),
            dai.clone(),
            usdc.clone(),
            usdt.clone(),
            "0x0000000000085d4780b73119b644ae5ecd22b376".to_string(), // TUSD
            "0x5d3a536e4d6dbd6114cc1ead35777bab948e3643".to_string(), // cDAI
            "0x39aa39c021dfbae8fac545936693ac917d5e7563".to_string(), // cUSDC
            "0x86fadb80d8d2cff3c3680819e4da99c10232ba0f".to_string(), // EBASE
            "0x57ab1ec28d129707052df4df418d58a2d46d5f51".to_string(), // sUSD
            "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2".to_string(), // MKR
            "0xc00e94cb662c3520282e6f5717214004a7f26888".to_string(), // COMP
            "0x514910771af9ca656af840dff83e8264ecf986ca".to_string(), // LINK
            "0x960b236a07cf122663c4303350609a66a7b288c0".to_string(), // ANT
            "0xc011a73ee8576fb46f5e1c5751ca3b9fe0af2a6f".to_string(), // SNX
            "0x0bc529c00c6401aef6d220be8c6ea1667f6ad93e".to_string(), // YFI
            "0xdf5e0e81dff6faf3a7e52ba697820c5e32d806a8".to_string(), // yCurv
            "0x853d955acef822db058eb8505911ed77f175b99e".to_string(), // FRAX
            "0xa47c8bf37f92abed4a126bda807a7b7498661acd".to_string(), // WUST
            "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984".to_string(), // UNI
            "0x2260fac5e5542a773aa44fbcfedf7c193bc2c599".to_string(), // WBTC
        ];

        let untracked_pairs = HashSet::from([
            "0x9ea3b5b4ec044b70375236a281986106457b20ef".to_string(), // DELTA
        ]);

        Self {
            weth,
            dai,
            usdc,
            usdt,
            whitelist,
            untracked_pairs,
            minimum_liquidity_threshold_eth: Decimal::TWO,
            minimum_usd_threshold_new_pairs: Decimal::from(400_000),
        }
    }

    /// Whether a token address is on the anchor whitelist.
    #[must_use]
    pub fn is_whitelisted(&self, token: &str) -> bool {
        self.whitelist.iter().any(|entry| entry == token)
    }

    /// Canonical pair key of the DAI/WETH reference pool. DAI is token0.
    #[must_use]
    pub fn dai_weth_pair(&self) -> (&str, &str) {
        (&self.dai, &self.weth)
    }

    /// Canonical pair key of the USDC/WETH reference pool. USDC is token0.
    #[must_use]
    pub fn usdc_weth_pair(&self) -> (&str, &str) {
        (&self.usdc, &self.weth)
    }

    /// Canonical pair key of the WETH/USDT reference pool. USDT is token1.
    #[must_use]
    pub fn usdt_weth_pair(&self) -> (&str, &str) {
        (&self.weth, &self.usdt)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}
