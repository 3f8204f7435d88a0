use custody_kv::KvError;
use custody_merkle::MerkleError;

/// Errors raised by [`crate::CommitmentStore`].
///
/// The HTTP layer maps each variant onto a status code: [`StoreError::Kv`]
/// and [`StoreError::Serialization`] are storage/transport faults (500);
/// [`StoreError::EmptyUpload`] is malformed input (400);
/// [`StoreError::IndexNotFound`] is an unknown index (400);
/// [`StoreError::ProofNotFound`] is a missing proof record for a resolved
/// index (400, per spec §4.3 step 2); only [`StoreError::FileNotFound`]
/// (step 3) is a 404. Both should never arise from this store's own
/// writes, only from a corrupted or hand-edited backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Kv(#[from] KvError),

    #[error("merkle engine error: {0}")]
    Merkle(#[from] MerkleError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cannot commit zero files")]
    EmptyUpload,

    #[error("index not found")]
    IndexNotFound,

    #[error("file not found")]
    FileNotFound,

    #[error("proof not found")]
    ProofNotFound,
}

pub type Result<T> = std::result::Result<T, StoreError>;
