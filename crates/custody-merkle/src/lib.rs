//! Merkle commitment engine for the file custody service.
//!
//! This crate has no I/O and no knowledge of files, servers, or storage
//! keys: it only knows about [`LeafHash`] values, how to build a
//! [`MerkleTree`] from an ordered sequence of them, and how to derive and
//! verify [`Proof`]s of inclusion. Everything that turns a file into a
//! leaf hash, or a proof into an HTTP response, lives one layer up in
//! `custody-store` and `custody-server`.

mod merkle;
mod models;

pub use merkle::{hash_pair, root_of_proof, verify, MerkleTree};
pub use models::{LeafHash, MerkleError, Proof, HASH_BYTES};
