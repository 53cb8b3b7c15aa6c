use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// A pool reserve-update notification from the event source.
///
/// Reserves are raw pre-scaling integers; the transition scales them by
/// each token's declared decimals. Only the pool address and the two
/// reserves drive the core; block number and timestamp ride along for
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveUpdate {
    /// Pool contract address.
    pub pool_address: String,
    /// New raw reserve of token0.
    pub reserve0: U256,
    /// New raw reserve of token1.
    pub reserve1: U256,
    /// Block the update was emitted in.
    pub block_number: u64,
    /// Block timestamp.
    pub timestamp: DateTime<Utc>,
}
