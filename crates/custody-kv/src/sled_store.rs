//! Embedded, ordered, crash-safe key-value backend.
//!
//! Backs `DB_ENGINE=sled` deployments, the Rust-idiomatic analogue of the
//! original's `leveldb` backend: both are embedded, log-structured engines
//! with the same single-process operational shape.

use crate::error::Result;
use crate::store::KvStore;
use std::path::Path;

/// A [`KvStore`] backed by a single `sled::Db`.
///
/// All keys live in sled's default tree; the commitment store's own key
/// schema (`file_<R><H>`, `proof_<R><H>`, `<R><i>`) already namespaces
/// everything it writes, so a second tree layer would add nothing.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Opens or creates a database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(SledStore { db })
    }

    /// An in-memory sled instance, useful for tests that want to exercise
    /// the sled backend's iteration semantics specifically.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(SledStore { db })
    }
}

impl KvStore for SledStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db.insert(key, value)?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|ivec| ivec.to_vec()))
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.db.remove(key)?;
        Ok(())
    }

    fn get_by_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut out = Vec::new();
        for entry in self.db.scan_prefix(prefix) {
            let (key, value) = entry?;
            out.push((key.to_vec(), value.to_vec()));
        }
        Ok(out)
    }

    fn delete_by_prefix(&self, prefix: &[u8]) -> Result<usize> {
        let keys: Vec<sled::IVec> = self
            .db
            .scan_prefix(prefix)
            .keys()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        for key in &keys {
            self.db.remove(key)?;
        }
        Ok(keys.len())
    }

    fn close(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get_round_trips() {
        let store = SledStore::temporary().unwrap();
        store.put(b"file_abc123", b"payload").unwrap();
        assert_eq!(store.get(b"file_abc123").unwrap(), Some(b"payload".to_vec()));
    }

    #[test]
    fn test_prefix_scan_finds_only_matching_keys() {
        let store = SledStore::temporary().unwrap();
        store.put(b"root1abc", b"v1").unwrap();
        store.put(b"root1xyz", b"v2").unwrap();
        store.put(b"root2abc", b"v3").unwrap();

        let results = store.get_by_prefix(b"root1").unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_delete_by_prefix_removes_only_matching_keys() {
        let store = SledStore::temporary().unwrap();
        store.put(b"root1_0", b"a").unwrap();
        store.put(b"root1_1", b"b").unwrap();
        store.put(b"root2_0", b"c").unwrap();

        let removed = store.delete_by_prefix(b"root1_").unwrap();
        assert_eq!(removed, 2);
        assert!(store.get(b"root2_0").unwrap().is_some());
    }
}
