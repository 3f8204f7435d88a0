//! Errors surfaced by the custody client binary.
//!
//! [`ClientError::TamperDetected`] is kept distinct from every other
//! variant: it is the one outcome where "print the error and exit 1" is
//! not enough context for a caller deciding whether their local files are
//! still safe to delete (they are not).

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no files found: provide --dir or --files")]
    NoFilesProvided,

    #[error("no files found under the given path(s)")]
    EmptyFileSet,

    #[error("reading local root hash from {path}: {source}")]
    LocalRootHash {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("server rejected the request ({status}): {body}")]
    ServerRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request to server failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("local filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed root hash: {0}")]
    BadRootHash(#[from] hex::FromHexError),

    #[error(
        "the server did not honor the commitment: file at index {index} failed proof \
         verification; local files were NOT deleted"
    )]
    TamperDetected { index: usize },
}
