//! The three HTTP endpoints: upload, update, download.
//!
//! Request and response bodies mirror the original service's JSON shapes:
//! file bytes travel as base64 strings (the implicit encoding Go's
//! `encoding/json` gives `[]byte`), and `update`'s response carries the new
//! root because, unlike upload, the client cannot predict it locally:
//! the merged leaf order is the server's to decide.

use crate::error::AppError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use custody_kv::KvStore;
use custody_merkle::{LeafHash, Proof};
use custody_store::CommitmentStore;
use serde::{Deserialize, Serialize};
use serde_with::base64::Base64;
use serde_with::serde_as;
use std::sync::Arc;

pub type AppState<K> = Arc<CommitmentStore<K>>;

pub fn router<K>(store: AppState<K>) -> Router
where
    K: KvStore + Send + Sync + 'static,
{
    Router::new()
        .route("/upload", post(upload::<K>))
        .route("/update/:root", post(update::<K>))
        .route("/download/:root/:index", get(download::<K>))
        .with_state(store)
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct FileList {
    #[serde_as(as = "Vec<Base64>")]
    files: Vec<Vec<u8>>,
}

#[serde_as]
#[derive(Debug, Serialize)]
struct DownloadResponse {
    #[serde_as(as = "Base64")]
    file: Vec<u8>,
    proof: Proof,
}

#[derive(Debug, Serialize)]
struct UpdateResponse {
    root_hash: LeafHash,
}

/// `POST /upload`: commits a new file set from scratch.
///
/// Replacement of a prior commitment is not exposed on this route: the
/// original service's undocumented `/upload/<root>` path variant is
/// omitted here (see DESIGN.md), since nothing advertises or depends on
/// it and the plain `/upload` route already covers every documented
/// client flow.
async fn upload<K: KvStore>(
    State(store): State<AppState<K>>,
    Json(body): Json<FileList>,
) -> Result<Response, AppError> {
    store.upload(body.files, None)?;
    Ok(StatusCode::OK.into_response())
}

/// `POST /update/:root`: unions `files` into the set already committed
/// under `root`, returning the new root.
async fn update<K: KvStore>(
    State(store): State<AppState<K>>,
    Path(root): Path<String>,
    Json(body): Json<FileList>,
) -> Result<Response, AppError> {
    let root = parse_root(&root)?;
    let new_root = store.update(root, body.files)?;
    Ok(Json(UpdateResponse { root_hash: new_root }).into_response())
}

/// `GET /download/:root/:index`: returns the file at `index` under
/// `root` together with its inclusion proof.
async fn download<K: KvStore>(
    State(store): State<AppState<K>>,
    Path((root, index)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let root = parse_root(&root)?;
    let index: usize = index
        .parse()
        .map_err(|_| custody_store::StoreError::IndexNotFound)?;

    let downloaded = store.download(root, index)?;
    Ok(Json(DownloadResponse {
        file: downloaded.file,
        proof: downloaded.proof,
    })
    .into_response())
}

fn parse_root(raw: &str) -> Result<LeafHash, custody_store::StoreError> {
    LeafHash::from_hex(raw).map_err(|_| custody_store::StoreError::IndexNotFound)
}
