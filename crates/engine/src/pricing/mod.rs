//! Pricing core.
//!
//! Free functions over the entity store and the static pricing
//! configuration. Every function degrades to 0 instead of failing:
//! missing entities, empty reserves, and exhausted searches are values,
//! not faults.

mod liquidity;
mod oracle;
mod resolver;
mod volume;

pub use liquidity::tracked_liquidity_usd;
pub use oracle::eth_price_in_usd;
pub use resolver::{eth_per_exchange_token, usd_per_exchange_token};
pub use volume::tracked_volume_usd;
