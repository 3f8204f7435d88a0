//! Client verifier: the CLI-facing half of the custody protocol.
//!
//! This crate composes `custody-merkle` (local root computation, proof
//! verification) with [`client::HttpClient`] (the request/response
//! contract against the server) and [`cache::Cache`] (the local
//! persisted state). It never touches `custody-kv` or `custody-store`
//! directly: the client only ever sees the server through HTTP.

pub mod cache;
pub mod cli;
pub mod client;
pub mod discovery;
pub mod error;

use custody_merkle::{verify, LeafHash, MerkleTree};
use error::ClientError;

/// Computes the root the client expects for `files`, in submission order.
///
/// This is the value the client trusts going into an upload; it never
/// asks the server to confirm it, only to honor it (§4.4's audit).
///
/// # Arguments
///
/// * `files` - the file contents, in the order they will be submitted.
///
/// # Returns
///
/// The root of the Merkle tree built over `files`' content hashes.
///
/// # Example
///
/// ```rust
/// use custody_client::expected_root;
///
/// let files = vec![b"a".to_vec(), b"b".to_vec()];
/// let root = expected_root(&files);
///
/// // Order matters: a different submission order yields a different root.
/// let reversed = vec![b"b".to_vec(), b"a".to_vec()];
/// assert_ne!(root, expected_root(&reversed));
/// ```
pub fn expected_root(files: &[Vec<u8>]) -> LeafHash {
    let leaves: Vec<LeafHash> = files.iter().map(|f| LeafHash::of(f)).collect();
    MerkleTree::build(leaves)
        .root()
        .expect("files is non-empty by the time this is called")
}

/// Downloads every file under `root` and verifies its proof.
///
/// This is the audit of spec.md §4.4: the client's only defense against a
/// server that returned a correctly-shaped response without actually
/// honoring the commitment.
///
/// # Arguments
///
/// * `http` - the client used to download each file.
/// * `root` - the commitment to audit against.
/// * `expected_count` - the number of indices to check, `0..expected_count`.
///
/// # Returns
///
/// `Ok(None)` if every file verified. `Ok(Some(index))` for the first
/// index whose proof failed to verify; callers must treat this as a
/// refusal to delete local originals.
pub fn audit(
    http: &client::HttpClient,
    root: LeafHash,
    expected_count: usize,
) -> Result<Option<usize>, ClientError> {
    for i in 0..expected_count {
        let (file, proof) = http.download(root, i)?;
        if !verify(LeafHash::of(&file), &proof, root) {
            return Ok(Some(i));
        }
    }
    Ok(None)
}
