//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use amm_index_engine::prelude::*;
//! ```

// Ingest
pub use crate::ingest::{ChannelEventSource, EventSource, FileEventSource, IngestError, run};

// Pricing
pub use crate::pricing::{
    eth_per_exchange_token, eth_price_in_usd, tracked_liquidity_usd, tracked_volume_usd,
    usd_per_exchange_token,
};

// Sync
pub use crate::sync::{ReserveUpdate, SyncProcessor};
