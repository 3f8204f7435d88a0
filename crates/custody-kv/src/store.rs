use crate::error::Result;

/// A byte-oriented key-value store.
///
/// Implementations own whatever locking or transactional semantics their
/// backend provides; callers get no cross-key atomicity guarantee beyond
/// what a single `put`/`delete` call does. Iteration order for
/// `get_by_prefix`/`delete_by_prefix` is the backend's natural key order
/// (lexicographic byte order for both backends this crate ships).
pub trait KvStore: Send + Sync {
    /// Stores `value` under `key`, overwriting any existing value.
    ///
    /// # Arguments
    ///
    /// * `key` - the key to write under.
    /// * `value` - the bytes to store; the backend owns its own copy.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Fetches the value stored under `key`, if any.
    ///
    /// # Returns
    ///
    /// `None` if `key` has never been written, or was deleted.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Removes `key`. Not an error if `key` was absent.
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Returns every `(key, value)` pair whose key starts with `prefix`, in
    /// key order.
    ///
    /// # Arguments
    ///
    /// * `prefix` - the byte prefix to scan for; an empty prefix matches
    ///   every key.
    fn get_by_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Removes every key starting with `prefix`.
    ///
    /// # Returns
    ///
    /// The number of keys removed.
    fn delete_by_prefix(&self, prefix: &[u8]) -> Result<usize>;

    /// Flushes any buffered writes and releases the backend's resources.
    /// Idempotent; safe to call during shutdown after in-flight requests
    /// have drained.
    fn close(&self) -> Result<()>;
}

/// Lets a server choose its backend at startup (`DB_ENGINE=sled|memory`)
/// while the commitment store above it stays generic over a single
/// concrete `K: KvStore`.
impl KvStore for Box<dyn KvStore> {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }

    fn get_by_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        (**self).get_by_prefix(prefix)
    }

    fn delete_by_prefix(&self, prefix: &[u8]) -> Result<usize> {
        (**self).delete_by_prefix(prefix)
    }

    fn close(&self) -> Result<()> {
        (**self).close()
    }
}
