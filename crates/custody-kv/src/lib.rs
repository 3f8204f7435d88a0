//! Key-value store abstraction used by the commitment store.
//!
//! `custody-store` talks only to the [`KvStore`] trait; it never imports
//! `sled` or touches a `BTreeMap` directly. Two backends are provided here:
//! [`SledStore`] for durable single-process deployments and [`MemoryStore`]
//! for tests and ephemeral deployments.

mod error;
mod memory;
mod sled_store;
mod store;

pub use error::{KvError, Result};
pub use memory::MemoryStore;
pub use sled_store::SledStore;
pub use store::KvStore;
