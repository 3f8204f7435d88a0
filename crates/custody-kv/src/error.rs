/// Errors raised by a [`crate::KvStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    /// The backend itself failed (disk I/O, corruption, a dropped sled tree).
    /// The underlying error is flattened to a string because `sled::Error`
    /// and other backend error types don't need to leak past this crate's
    /// boundary.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored value failed to (de)serialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sled::Error> for KvError {
    fn from(err: sled::Error) -> Self {
        KvError::Backend(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KvError>;
