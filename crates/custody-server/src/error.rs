//! Maps [`StoreError`] onto HTTP responses.
//!
//! The response body is always a plain-text reason string, never the
//! underlying error's `Display`, which can contain backend detail that
//! doesn't belong in a response. The full error is logged at `ERROR`
//! before the response is built.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use custody_store::StoreError;

const ERR_INTERNAL: &str = "internal error, try again";
const ERR_BAD_REQUEST: &str = "invalid data sent";
const ERR_NOT_FOUND: &str = "not found";

pub struct AppError(pub StoreError);

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            StoreError::EmptyUpload | StoreError::IndexNotFound | StoreError::ProofNotFound => {
                (StatusCode::BAD_REQUEST, ERR_BAD_REQUEST)
            }
            StoreError::FileNotFound => (StatusCode::NOT_FOUND, ERR_NOT_FOUND),
            StoreError::Kv(_) | StoreError::Merkle(_) | StoreError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ERR_INTERNAL)
            }
        };

        tracing::error!(error = %self.0, %status, "request failed");
        (status, message).into_response()
    }
}
