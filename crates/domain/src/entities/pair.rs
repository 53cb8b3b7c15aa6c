use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reserve ratio with an explicit zero guard.
///
/// Defined as 0 when the denominator is 0; a missing price is a value,
/// not a fault.
#[must_use]
pub fn price_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// A canonical token pair, aggregated across all exchanges.
///
/// Keyed by `(token0, token1)` in canonical address order. The oracle
/// reads these records; the sync transition maintains them by folding in
/// each pool's reserve delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    /// First token, canonical order.
    pub token0: String,
    /// Second token, canonical order.
    pub token1: String,
    /// Aggregated reserve of token0, decimal-scaled.
    pub reserve0: Decimal,
    /// Aggregated reserve of token1, decimal-scaled.
    pub reserve1: Decimal,
    /// reserve0 / reserve1; 0 when reserve1 is 0.
    pub token0_price: Decimal,
    /// reserve1 / reserve0; 0 when reserve0 is 0.
    pub token1_price: Decimal,
    /// Combined reserve value in ETH.
    pub reserve_eth: Decimal,
    /// Combined reserve value in USD.
    pub reserve_usd: Decimal,
}

impl Pair {
    /// Zero-initialized record used when a load misses.
    pub fn placeholder(token0: impl Into<String>, token1: impl Into<String>) -> Self {
        Self {
            token0: token0.into(),
            token1: token1.into(),
            reserve0: Decimal::ZERO,
            reserve1: Decimal::ZERO,
            token0_price: Decimal::ZERO,
            token1_price: Decimal::ZERO,
            reserve_eth: Decimal::ZERO,
            reserve_usd: Decimal::ZERO,
        }
    }

    /// Recomputes both price ratios from the current reserves.
    pub fn update_prices(&mut self) {
        self.token0_price = price_ratio(self.reserve0, self.reserve1);
        self.token1_price = price_ratio(self.reserve1, self.reserve0);
    }
}

/// One liquidity pool, scoped to the exchange that deployed it.
///
/// Keyed by the pool contract address. `token0`/`token1` follow the same
/// canonical order as [`Pair`]; lookups by token pair must use that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangePair {
    /// Pool contract address.
    pub address: String,
    /// Exchange (factory) that deployed this pool.
    pub exchange: String,
    /// First token, canonical order.
    pub token0: String,
    /// Second token, canonical order.
    pub token1: String,
    /// Reserve of token0, decimal-scaled.
    pub reserve0: Decimal,
    /// Reserve of token1, decimal-scaled.
    pub reserve1: Decimal,
    /// reserve0 / reserve1; 0 when reserve1 is 0.
    pub token0_price: Decimal,
    /// reserve1 / reserve0; 0 when reserve0 is 0.
    pub token1_price: Decimal,
    /// Reserve value in ETH.
    pub reserve_eth: Decimal,
    /// Reserve value in USD.
    pub reserve_usd: Decimal,
}

impl ExchangePair {
    /// Zero-initialized record used when a load misses.
    pub fn placeholder(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            exchange: String::new(),
            token0: String::new(),
            token1: String::new(),
            reserve0: Decimal::ZERO,
            reserve1: Decimal::ZERO,
            token0_price: Decimal::ZERO,
            token1_price: Decimal::ZERO,
            reserve_eth: Decimal::ZERO,
            reserve_usd: Decimal::ZERO,
        }
    }

    /// Recomputes both price ratios from the current reserves.
    pub fn update_prices(&mut self) {
        self.token0_price = price_ratio(self.reserve0, self.reserve1);
        self.token1_price = price_ratio(self.reserve1, self.reserve0);
    }
}
