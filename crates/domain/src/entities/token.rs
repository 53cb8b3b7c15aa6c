use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A traded asset, aggregated across every pool it participates in.
///
/// `total_liquidity` is the sum of the token's reserve across all pools,
/// in the token's own units. It is maintained incrementally by the sync
/// transition (subtract prior contribution, add new), never recomputed by
/// full summation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Token contract address.
    pub address: String,
    /// Ticker symbol, empty when unknown.
    pub symbol: String,
    /// Human-readable name, empty when unknown.
    pub name: String,
    /// Declared decimal precision of raw on-chain amounts.
    pub decimals: u8,
    /// Sum of reserves across all pools, in token units.
    pub total_liquidity: Decimal,
    /// Last derived price in ETH; 0 means unknown, not worthless.
    pub eth_price: Decimal,
}

impl Token {
    pub fn new(
        address: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            total_liquidity: Decimal::ZERO,
            eth_price: Decimal::ZERO,
        }
    }

    /// Zero-initialized record used when a load misses.
    pub fn placeholder(address: impl Into<String>) -> Self {
        // 18 is the ERC-20 default precision.
        Self::new(address, "", "", 18)
    }
}

/// A token's state scoped to one exchange deployment.
///
/// Partitioning per exchange keeps one deployment's liquidity from
/// leaking into another's price discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeToken {
    /// Token contract address.
    pub token: String,
    /// Exchange (factory) this record is scoped to.
    pub exchange: String,
    /// Sum of reserves across this exchange's pools, in token units.
    pub total_liquidity: Decimal,
    /// Last derived price in ETH within this exchange; 0 means unknown.
    pub eth_price: Decimal,
}

impl ExchangeToken {
    pub fn new(token: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            exchange: exchange.into(),
            total_liquidity: Decimal::ZERO,
            eth_price: Decimal::ZERO,
        }
    }

    /// Zero-initialized record used when a load misses.
    pub fn placeholder(token: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self::new(token, exchange)
    }
}
