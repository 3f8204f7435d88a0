//! Commitment store protocol: turns a committed file set into keyed
//! key-value records and back.
//!
//! This crate owns the three operations the server exposes: upload,
//! update, download, and the key schema they read and write. It knows
//! nothing about HTTP; `custody-server` is a thin translation layer on
//! top of [`CommitmentStore`].

mod error;
mod keys;
mod store;

pub use error::{Result, StoreError};
pub use store::{CommitmentStore, DownloadedFile};
