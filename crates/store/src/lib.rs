//! Entity repository for the AMM pair index.
//!
//! Every load returns the entity together with an explicit `exists`
//! flag; absence is a first-class case, never an error or a null. Saves
//! are idempotent upserts keyed by identifier. The backend is in-memory:
//! persistence engines are an external concern, this crate is the
//! load/save contract the engine runs against.

mod entity_store;

pub use entity_store::{EntityStore, Loaded};
