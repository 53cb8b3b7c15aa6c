//! Reserve-sync state transition.
//!
//! One transition per reserve-update event, processed to completion
//! before the next is admitted. Events for the same pool must arrive in
//! on-chain order, exactly once: the exchange-level liquidity total is a
//! pure accumulation and replays double-count it.

mod events;
mod processor;

pub use events::ReserveUpdate;
pub use processor::SyncProcessor;
