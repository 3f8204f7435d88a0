//! Blocking HTTP client for the three server endpoints.
//!
//! The client CLI runs one operation per invocation and exits, so a
//! blocking `reqwest::blocking::Client` is the natural fit: there is no
//! concurrency to juggle and no reason to drag the Tokio runtime into the
//! binary the server already needs it in.

use crate::error::ClientError;
use custody_merkle::{LeafHash, Proof};
use serde::{Deserialize, Serialize};
use serde_with::base64::Base64;
use serde_with::serde_as;

pub struct HttpClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct FileList<'a> {
    #[serde_as(as = "Vec<Base64>")]
    files: &'a [Vec<u8>],
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    root_hash: LeafHash,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct DownloadResponse {
    #[serde_as(as = "Base64")]
    file: Vec<u8>,
    proof: Proof,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpClient {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// `POST /upload`: commits `files` as a brand new set.
    ///
    /// # Arguments
    ///
    /// * `files` - the file contents to submit, in the order they should
    ///   be indexed under the new commitment.
    ///
    /// # Returns
    ///
    /// `Ok(())` once the server has accepted the request. The caller is
    /// still responsible for auditing the result against its own locally
    /// computed root before trusting it.
    pub fn upload(&self, files: &[Vec<u8>]) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .json(&FileList { files })
            .send()?;
        reject_non_success(response)?;
        Ok(())
    }

    /// `POST /update/<root>`: unions `files` into the set committed under
    /// `root`, returning the new root.
    ///
    /// # Arguments
    ///
    /// * `root` - the commitment the new files are unioned into.
    /// * `files` - the file contents to add.
    ///
    /// # Returns
    ///
    /// The new root the server committed, which the caller must still
    /// verify with its own audit rather than trust outright.
    pub fn update(&self, root: LeafHash, files: &[Vec<u8>]) -> Result<LeafHash, ClientError> {
        let response = self
            .http
            .post(format!("{}/update/{}", self.base_url, root.as_hex()))
            .json(&FileList { files })
            .send()?;
        let response = reject_non_success(response)?;
        let parsed: UpdateResponse = response.json()?;
        Ok(parsed.root_hash)
    }

    /// `GET /download/<root>/<index>`: returns the file at `index` under
    /// `root` together with its inclusion proof.
    ///
    /// # Arguments
    ///
    /// * `root` - the commitment to fetch from.
    /// * `index` - the position of the file within that commitment.
    ///
    /// # Returns
    ///
    /// The file's bytes and its inclusion proof. The caller must verify
    /// the proof before trusting the bytes; this method does not.
    pub fn download(&self, root: LeafHash, index: usize) -> Result<(Vec<u8>, Proof), ClientError> {
        let response = self
            .http
            .get(format!("{}/download/{}/{}", self.base_url, root.as_hex(), index))
            .send()?;
        let response = reject_non_success(response)?;
        let parsed: DownloadResponse = response.json()?;
        Ok((parsed.file, parsed.proof))
    }
}

fn reject_non_success(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ClientError::ServerRejected { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    // The request body must be the base64-array shape the server's own
    // `FileList` deserializes (spec.md §6): a bare JSON array, not an
    // object wrapping a `files` field.
    #[test]
    fn test_file_list_serializes_as_a_bare_base64_array() {
        let files = vec![b"a".to_vec(), b"bb".to_vec()];
        let wire = serde_json::to_string(&FileList { files: &files }).unwrap();
        assert_eq!(wire, r#"["YQ==","YmI="]"#);
    }

    #[test]
    fn test_update_response_deserializes_root_hash() {
        let hex = "a".repeat(64);
        let wire = format!(r#"{{"root_hash":"{hex}"}}"#);
        let parsed: UpdateResponse = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed.root_hash.as_hex(), hex);
    }

    #[test]
    fn test_download_response_deserializes_file_and_proof() {
        let wire = r#"{"file":"aGVsbG8=","proof":{"Hashes":[],"Positions":[]}}"#;
        let parsed: DownloadResponse = serde_json::from_str(wire).unwrap();
        assert_eq!(parsed.file, b"hello");
        assert!(parsed.proof.is_empty());
    }
}
