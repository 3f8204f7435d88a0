//! The client's local cache directory: `.rootHash` and `downloaded_file_*`.
//!
//! This is the "thin local-cache collaborator" spec.md §4.4 calls out as
//! external to the core: plain file I/O, no Merkle logic, no knowledge
//! of the wire protocol.

use crate::error::ClientError;
use custody_merkle::LeafHash;
use std::path::{Path, PathBuf};

const ROOT_HASH_FILE: &str = ".rootHash";

pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    /// Opens `dir` as the cache directory, creating it (and any parent
    /// directories) if it doesn't exist yet.
    ///
    /// # Arguments
    ///
    /// * `dir` - the directory to use as the cache root, usually
    ///   `--config-dir` or [`default_config_dir`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use custody_client::cache::Cache;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = Cache::open(dir.path()).unwrap();
    /// assert!(cache.dir().is_dir());
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Cache { dir })
    }

    fn root_hash_path(&self) -> PathBuf {
        self.dir.join(ROOT_HASH_FILE)
    }

    /// Persists the current commitment root as ASCII hex.
    ///
    /// # Arguments
    ///
    /// * `root` - the root hash to persist, overwriting whatever was
    ///   saved before.
    pub fn save_root_hash(&self, root: LeafHash) -> Result<(), ClientError> {
        std::fs::write(self.root_hash_path(), root.as_hex())?;
        Ok(())
    }

    /// Reads back the commitment root saved by a previous upload/update.
    ///
    /// # Returns
    ///
    /// The root hash, or [`ClientError::LocalRootHash`] if nothing has
    /// been saved in this cache directory yet.
    pub fn load_root_hash(&self) -> Result<LeafHash, ClientError> {
        let path = self.root_hash_path();
        let raw = std::fs::read_to_string(&path).map_err(|source| ClientError::LocalRootHash {
            path,
            source,
        })?;
        Ok(LeafHash::from_hex(raw.trim())?)
    }

    /// Saves a downloaded file as `downloaded_file_<index>` under the
    /// cache directory and returns the path it was written to.
    ///
    /// # Arguments
    ///
    /// * `index` - the index the file was downloaded at; used verbatim
    ///   in the saved filename.
    /// * `contents` - the file bytes, already verified by the caller.
    ///
    /// # Returns
    ///
    /// The path the file was written to.
    pub fn save_downloaded_file(&self, index: usize, contents: &[u8]) -> Result<PathBuf, ClientError> {
        let path = self.dir.join(format!("downloaded_file_{index}"));
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// The default cache directory, `$HOME/.zc`, used when `--config-dir` is
/// not given.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".zc")
}

#[cfg(test)]
mod tests {
    use super::*;
    use custody_merkle::LeafHash;

    #[test]
    fn test_root_hash_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();
        let root = LeafHash::of(b"a-root");

        cache.save_root_hash(root).unwrap();
        assert_eq!(cache.load_root_hash().unwrap(), root);
    }

    #[test]
    fn test_load_root_hash_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();
        assert!(matches!(
            cache.load_root_hash(),
            Err(ClientError::LocalRootHash { .. })
        ));
    }

    #[test]
    fn test_open_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        let cache = Cache::open(&nested).unwrap();
        assert!(cache.dir().is_dir());
    }

    #[test]
    fn test_save_downloaded_file_writes_indexed_filename() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();

        let path = cache.save_downloaded_file(3, b"payload").unwrap();
        assert_eq!(path.file_name().unwrap(), "downloaded_file_3");
        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
    }
}
