//! Core data types for the Merkle commitment engine.
//!
//! Every hash in this crate is the 64-character lowercase hex encoding of a
//! SHA-256 digest. The hex *string* form, not the raw 32 bytes, is what gets
//! hashed again at internal nodes (see [`crate::merkle::hash_pair`]). That
//! detail is load-bearing for proof interoperability and must not be
//! "optimized" into raw-byte concatenation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of raw bytes in a SHA-256 digest.
pub const HASH_BYTES: usize = 32;

/// A SHA-256 digest, always handled as its lowercase hex encoding.
///
/// `LeafHash` wraps the raw bytes rather than the hex `String` so that
/// equality, ordering and hashing are cheap, but every cryptographic
/// operation goes through [`LeafHash::as_hex`] to get the ASCII form the
/// protocol actually commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafHash([u8; HASH_BYTES]);

impl LeafHash {
    /// Wraps a raw 32-byte digest.
    pub fn from_bytes(bytes: [u8; HASH_BYTES]) -> Self {
        LeafHash(bytes)
    }

    /// Hashes `data` with SHA-256 and wraps the result.
    pub fn of(data: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        let digest = Sha256::digest(data);
        let mut bytes = [0u8; HASH_BYTES];
        bytes.copy_from_slice(&digest);
        LeafHash(bytes)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_BYTES] {
        &self.0
    }

    /// The 64-character lowercase hex encoding used on the wire and as the
    /// hashing input at internal nodes.
    pub fn as_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a 64-character lowercase (or uppercase) hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; HASH_BYTES];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(LeafHash(bytes))
    }
}

impl fmt::Display for LeafHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl Serialize for LeafHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for LeafHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LeafHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A Merkle inclusion proof, in the wire shape the protocol commits to:
/// two parallel arrays rather than a list of `(hash, position)` structs.
///
/// `positions[i] = true` means the sibling at `hashes[i]` sits on the
/// *right* of the current hash at that level (the current hash is the left
/// input to the parent); `false` means the sibling sits on the left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    #[serde(rename = "Hashes")]
    pub hashes: Vec<LeafHash>,
    #[serde(rename = "Positions")]
    pub positions: Vec<bool>,
}

impl Proof {
    /// Builds a proof from already-paired `(sibling, is_sibling_on_right)`
    /// steps, leaf-to-root order.
    pub fn from_steps(steps: Vec<(LeafHash, bool)>) -> Self {
        let mut hashes = Vec::with_capacity(steps.len());
        let mut positions = Vec::with_capacity(steps.len());
        for (hash, position) in steps {
            hashes.push(hash);
            positions.push(position);
        }
        Proof { hashes, positions }
    }

    /// Iterates the proof as `(sibling, position)` pairs, leaf-to-root.
    pub fn steps(&self) -> impl Iterator<Item = (&LeafHash, bool)> {
        self.hashes.iter().zip(self.positions.iter().copied())
    }

    /// Number of levels this proof traverses.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// Errors raised by the Merkle engine.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MerkleError {
    /// The tree has no leaves, so it has no root and cannot produce proofs.
    #[error("tree is empty")]
    EmptyTree,

    /// The requested leaf hash is not present in the tree.
    #[error("leaf not found")]
    NotFound,

    /// The proof's two parallel arrays have mismatched lengths.
    #[error("malformed proof: {0} hashes but {1} positions")]
    MalformedProof(usize, usize),
}
