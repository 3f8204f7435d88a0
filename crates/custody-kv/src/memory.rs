//! In-process key-value backend.
//!
//! Backs `DB_ENGINE=memory` deployments and every test in this workspace
//! that doesn't specifically exercise `sled`. State does not survive
//! process restart. This stands in for the original's `scylladb` option;
//! neither of which is intrinsic to the commitment store's protocol (see
//! DESIGN.md).

use crate::error::Result;
use crate::store::KvStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// A `BTreeMap`-backed [`KvStore`] guarded by a single `RwLock`.
///
/// Ordered by construction, so prefix scans are a contiguous `range()` over
/// the map rather than a full scan.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            map: RwLock::new(BTreeMap::new()),
        }
    }
}

/// The exclusive upper bound for a lexicographic prefix scan: the smallest
/// key that is strictly greater than every key starting with `prefix`.
/// `None` means the prefix is all-0xFF bytes (or empty-but-unbounded), in
/// which case the scan has no upper bound.
fn prefix_upper_bound(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut upper = prefix.to_vec();
    while let Some(last) = upper.pop() {
        if last != 0xFF {
            upper.push(last + 1);
            return Some(upper);
        }
    }
    None
}

impl KvStore for MemoryStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.map.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.map.read().get(key).cloned())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.map.write().remove(key);
        Ok(())
    }

    fn get_by_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let map = self.map.read();
        let range = match prefix_upper_bound(prefix) {
            Some(upper) => map.range(prefix.to_vec()..upper),
            None => map.range(prefix.to_vec()..),
        };
        Ok(range.map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    fn delete_by_prefix(&self, prefix: &[u8]) -> Result<usize> {
        let mut map = self.map.write();
        let keys: Vec<Vec<u8>> = {
            let range = match prefix_upper_bound(prefix) {
                Some(upper) => map.range(prefix.to_vec()..upper),
                None => map.range(prefix.to_vec()..),
            };
            range.map(|(k, _)| k.clone()).collect()
        };
        for key in &keys {
            map.remove(key);
        }
        Ok(keys.len())
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get_round_trips() {
        let store = MemoryStore::new();
        store.put(b"file_abc123", b"payload").unwrap();
        assert_eq!(store.get(b"file_abc123").unwrap(), Some(b"payload".to_vec()));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(b"nope").unwrap(), None);
    }

    #[test]
    fn test_delete_removes_key() {
        let store = MemoryStore::new();
        store.put(b"k", b"v").unwrap();
        store.delete(b"k").unwrap();
        assert_eq!(store.get(b"k").unwrap(), None);
    }

    #[test]
    fn test_delete_missing_key_is_not_an_error() {
        let store = MemoryStore::new();
        assert!(store.delete(b"absent").unwrap() == ());
    }

    #[test]
    fn test_prefix_scan_finds_only_matching_keys() {
        let store = MemoryStore::new();
        store.put(b"root1abc", b"v1").unwrap();
        store.put(b"root1xyz", b"v2").unwrap();
        store.put(b"root2abc", b"v3").unwrap();

        let mut results = store.get_by_prefix(b"root1").unwrap();
        results.sort();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, b"root1abc");
        assert_eq!(results[1].0, b"root1xyz");
    }

    #[test]
    fn test_delete_by_prefix_removes_only_matching_keys() {
        let store = MemoryStore::new();
        store.put(b"root1_0", b"a").unwrap();
        store.put(b"root1_1", b"b").unwrap();
        store.put(b"root2_0", b"c").unwrap();

        let removed = store.delete_by_prefix(b"root1_").unwrap();
        assert_eq!(removed, 2);
        assert!(store.get(b"root2_0").unwrap().is_some());
        assert!(store.get_by_prefix(b"root1_").unwrap().is_empty());
    }

    #[test]
    fn test_prefix_scan_with_trailing_0xff_byte_has_no_upper_bound() {
        let store = MemoryStore::new();
        store.put(&[0xFF, 0x00], b"a").unwrap();
        store.put(&[0xFF, 0xFF], b"b").unwrap();

        let results = store.get_by_prefix(&[0xFF]).unwrap();
        assert_eq!(results.len(), 2);
    }
}
