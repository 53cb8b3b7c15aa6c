use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Global totals for one AMM deployment (factory).
///
/// Liquidity totals are maintained by the sync transition. Volume totals
/// belong to the swap accounting path, which is not active; they exist
/// and stay zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// Factory contract address.
    pub address: String,
    /// Tracked liquidity across all pools, in ETH.
    pub total_liquidity_eth: Decimal,
    /// Tracked liquidity across all pools, in USD.
    pub total_liquidity_usd: Decimal,
    /// Tracked volume across all pools, in ETH.
    pub total_volume_eth: Decimal,
    /// Tracked volume across all pools, in USD.
    pub total_volume_usd: Decimal,
}

impl Exchange {
    /// Zero-initialized record used when a load misses.
    pub fn placeholder(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            total_liquidity_eth: Decimal::ZERO,
            total_liquidity_usd: Decimal::ZERO,
            total_volume_eth: Decimal::ZERO,
            total_volume_usd: Decimal::ZERO,
        }
    }
}

/// Singleton oracle record per exchange holding the ETH/USD rate.
///
/// Recomputed on every sync transition. A value of 0 means the oracle has
/// no qualifying stablecoin pool yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// Exchange this rate belongs to.
    pub exchange: String,
    /// Current ETH price in USD.
    pub value: Decimal,
}

impl Bundle {
    /// Zero-initialized record used when a load misses.
    pub fn placeholder(exchange: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            value: Decimal::ZERO,
        }
    }
}
