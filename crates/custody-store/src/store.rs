//! The commitment store: turns a committed file set into the three key
//! families described in [`crate::keys`] and back.
//!
//! Upload and update both write a *complete* commitment (every file,
//! every proof, a full 0-based index) before touching anything that was
//! there before, so a caller that observes a successful response always
//! sees the new commitment fully materialized. Neither operation is
//! atomic against concurrent readers of the old root; see the
//! concurrency notes in this crate's top-level docs.

use crate::error::{Result, StoreError};
use crate::keys;
use custody_kv::KvStore;
use custody_merkle::{LeafHash, MerkleTree, Proof};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A file together with the proof of its inclusion under some root.
pub struct DownloadedFile {
    pub file: Vec<u8>,
    pub proof: Proof,
}

/// Protocol layer over a [`KvStore`] backend.
///
/// Generic over the backend so the protocol can be exercised against
/// `custody_kv::MemoryStore` in tests without standing up `sled`.
#[derive(Clone)]
pub struct CommitmentStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> CommitmentStore<K> {
    pub fn new(kv: K) -> Self {
        CommitmentStore { kv }
    }

    /// Commits a new file set, returning its root.
    ///
    /// If `replace_root` names a prior commitment, every file, proof and
    /// index record under that root is deleted first, including the index
    /// records, which the original implementation this protocol is modeled
    /// on left behind (see DESIGN.md).
    ///
    /// # Arguments
    ///
    /// * `files` - the complete file set to commit, in the order their
    ///   indices should be assigned.
    /// * `replace_root` - an existing root whose commitment should be torn
    ///   down before the new one is written, or `None` for a fresh upload.
    ///
    /// # Returns
    ///
    /// The root hash of the newly committed tree. [`StoreError::EmptyUpload`]
    /// if `files` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use custody_kv::MemoryStore;
    /// use custody_store::CommitmentStore;
    ///
    /// let store = CommitmentStore::new(MemoryStore::new());
    /// let root = store.upload(vec![b"a".to_vec(), b"b".to_vec()], None).unwrap();
    /// assert!(store.download(root, 0).is_ok());
    /// ```
    pub fn upload(&self, files: Vec<Vec<u8>>, replace_root: Option<LeafHash>) -> Result<LeafHash> {
        debug!(count = files.len(), replacing = ?replace_root, "upload requested");
        if let Some(old_root) = replace_root {
            self.delete_commitment(&old_root.as_hex())?;
        }
        let root = self.commit(files)?;
        info!(%root, "upload committed");
        Ok(root)
    }

    /// Merges `files` into the file set already committed under `root`,
    /// producing a new root. Existing files are looked up by content hash,
    /// so files already present are not duplicated; this is a union, not
    /// a replace.
    ///
    /// The resulting leaf order is whatever order the union iterates in
    /// (lexicographic by leaf hex). The protocol does not promise the new
    /// tree preserves the old one's leaf order, only that every old file
    /// and every new file ends up committed.
    ///
    /// # Arguments
    ///
    /// * `root` - the existing commitment to merge into.
    /// * `files` - the files to add; files already present under `root`
    ///   (by content hash) are not duplicated.
    ///
    /// # Returns
    ///
    /// The root hash of the merged tree, which replaces `root` entirely.
    pub fn update(&self, root: LeafHash, files: Vec<Vec<u8>>) -> Result<LeafHash> {
        debug!(%root, incoming = files.len(), "update requested");
        let root_hex = root.as_hex();

        let mut union: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        for (key, value) in self.kv.get_by_prefix(&keys::file_prefix(&root_hex))? {
            if let Some(leaf_hex) = keys::leaf_hex_from_file_key(&key, &root_hex) {
                union.insert(leaf_hex, value);
            }
        }
        for file in files {
            union.insert(LeafHash::of(&file).as_hex(), file);
        }

        let merged: Vec<Vec<u8>> = union.into_values().collect();
        let new_root = self.commit(merged)?;

        // The new commitment is fully written before the old one is torn
        // down, so a crash here leaves both commitments readable rather
        // than neither.
        self.delete_commitment(&root_hex)?;

        info!(old_root = %root, new_root = %new_root, "update committed");
        Ok(new_root)
    }

    /// Fetches the `index`-th file committed under `root`, with its proof.
    ///
    /// # Returns
    ///
    /// [`StoreError::IndexNotFound`] if `root`/`index` don't resolve to a
    /// leaf hash; [`StoreError::ProofNotFound`] or [`StoreError::FileNotFound`]
    /// if the resolved leaf is missing its proof or file record.
    pub fn download(&self, root: LeafHash, index: usize) -> Result<DownloadedFile> {
        let root_hex = root.as_hex();
        debug!(%root, index, "download requested");

        let leaf_hex_bytes = self
            .kv
            .get(&keys::index_key(&root_hex, index))?
            .ok_or_else(|| {
                warn!(%root, index, "index not found");
                StoreError::IndexNotFound
            })?;
        let leaf_hex = String::from_utf8_lossy(&leaf_hex_bytes).into_owned();

        let proof_bytes = self
            .kv
            .get(&keys::proof_key(&root_hex, &leaf_hex))?
            .ok_or(StoreError::ProofNotFound)?;
        let proof: Proof = serde_json::from_slice(&proof_bytes)?;

        let file = self
            .kv
            .get(&keys::file_key(&root_hex, &leaf_hex))?
            .ok_or(StoreError::FileNotFound)?;

        Ok(DownloadedFile { file, proof })
    }

    /// Releases the backend's resources. Called once, after in-flight
    /// requests have drained, during server shutdown.
    pub fn close(&self) -> Result<()> {
        Ok(self.kv.close()?)
    }

    /// Builds a tree over `files`, writes the full file/proof/index triple
    /// for every leaf, and returns the new root. Used by both `upload`
    /// (no prior commitment) and `update` (after merging).
    fn commit(&self, files: Vec<Vec<u8>>) -> Result<LeafHash> {
        if files.is_empty() {
            return Err(StoreError::EmptyUpload);
        }

        let leaves: Vec<LeafHash> = files.iter().map(|f| LeafHash::of(f)).collect();
        let tree = MerkleTree::build(leaves.clone());
        let root = tree.root().expect("non-empty leaves always produce a root");
        let root_hex = root.as_hex();

        for (i, (leaf, file)) in leaves.iter().zip(files.iter()).enumerate() {
            let leaf_hex = leaf.as_hex();
            let proof = tree.proof_for(*leaf)?;
            let proof_bytes = serde_json::to_vec(&proof)?;

            self.kv.put(&keys::proof_key(&root_hex, &leaf_hex), &proof_bytes)?;
            self.kv.put(&keys::index_key(&root_hex, i), leaf_hex.as_bytes())?;
            self.kv.put(&keys::file_key(&root_hex, &leaf_hex), file)?;
        }

        Ok(root)
    }

    /// Deletes every file, proof and index record under `root_hex`.
    fn delete_commitment(&self, root_hex: &str) -> Result<()> {
        self.kv.delete_by_prefix(&keys::file_prefix(root_hex))?;
        self.kv.delete_by_prefix(&keys::proof_prefix(root_hex))?;
        self.kv.delete_by_prefix(&keys::index_prefix(root_hex))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use custody_kv::MemoryStore;

    fn store() -> CommitmentStore<MemoryStore> {
        CommitmentStore::new(MemoryStore::new())
    }

    #[test]
    fn test_upload_then_download_every_index_verifies() {
        let store = store();
        let files = vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()];
        let root = store.upload(files.clone(), None).unwrap();

        for i in 0..files.len() {
            let downloaded = store.download(root, i).unwrap();
            assert_eq!(downloaded.file, files[i]);
            assert!(custody_merkle::verify(
                LeafHash::of(&downloaded.file),
                &downloaded.proof,
                root
            ));
        }
    }

    #[test]
    fn test_download_unknown_index_is_index_not_found() {
        let store = store();
        let root = store.upload(vec![b"a".to_vec()], None).unwrap();
        assert!(matches!(
            store.download(root, 5),
            Err(StoreError::IndexNotFound)
        ));
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let store = store();
        assert!(matches!(
            store.upload(vec![], None),
            Err(StoreError::EmptyUpload)
        ));
    }

    #[test]
    fn test_upload_replace_deletes_old_commitment_entirely() {
        let store = store();
        let first_root = store.upload(vec![b"a".to_vec(), b"b".to_vec()], None).unwrap();

        let second_root = store
            .upload(vec![b"c".to_vec()], Some(first_root))
            .unwrap();
        assert_ne!(first_root, second_root);

        // The old root's index, file and proof records are all gone.
        assert!(matches!(
            store.download(first_root, 0),
            Err(StoreError::IndexNotFound)
        ));
        let downloaded = store.download(second_root, 0).unwrap();
        assert_eq!(downloaded.file, b"c".to_vec());
    }

    #[test]
    fn test_update_is_a_union_not_a_replace() {
        let store = store();
        let root1 = store.upload(vec![b"a".to_vec(), b"b".to_vec()], None).unwrap();

        let root2 = store.update(root1, vec![b"c".to_vec()]).unwrap();
        assert_ne!(root1, root2);

        // All three files are retrievable under the new root.
        let mut found = Vec::new();
        for i in 0..3 {
            found.push(store.download(root2, i).unwrap().file);
        }
        found.sort();
        assert_eq!(found, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);

        // The old root is gone.
        assert!(matches!(
            store.download(root1, 0),
            Err(StoreError::IndexNotFound)
        ));
    }

    #[test]
    fn test_update_does_not_duplicate_a_file_already_present() {
        let store = store();
        let root1 = store.upload(vec![b"a".to_vec(), b"b".to_vec()], None).unwrap();

        // Re-submitting "a" alongside a genuinely new file "c" should
        // leave the committed set at {a, b, c}, not {a, a, b, c}.
        let root2 = store.update(root1, vec![b"a".to_vec(), b"c".to_vec()]).unwrap();

        let mut found = Vec::new();
        for i in 0..3 {
            found.push(store.download(root2, i).unwrap().file);
        }
        found.sort();
        assert_eq!(found, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        assert!(matches!(
            store.download(root2, 3),
            Err(StoreError::IndexNotFound)
        ));
    }

    #[test]
    fn test_update_with_duplicate_leaves_leaves_no_dangling_index() {
        // Two indices point at the same leaf hash (duplicate file
        // content). A naive "delete indices 0..new_len" would under-delete
        // here, since new_len (distinct files) is smaller than the old
        // index count (2). Prefix-deleting the whole old root closes that
        // gap regardless of how the counts compare.
        let store = store();
        let root1 = store
            .upload(vec![b"dup".to_vec(), b"dup".to_vec()], None)
            .unwrap();

        let root2 = store.update(root1, vec![]).unwrap();

        assert!(matches!(
            store.download(root1, 0),
            Err(StoreError::IndexNotFound)
        ));
        assert!(matches!(
            store.download(root1, 1),
            Err(StoreError::IndexNotFound)
        ));

        let downloaded = store.download(root2, 0).unwrap();
        assert_eq!(downloaded.file, b"dup".to_vec());
    }

    #[test]
    fn test_duplicate_leaves_within_a_single_upload_both_verify() {
        let store = store();
        let root = store
            .upload(vec![b"dup".to_vec(), b"dup".to_vec()], None)
            .unwrap();

        for i in 0..2 {
            let downloaded = store.download(root, i).unwrap();
            assert!(custody_merkle::verify(
                LeafHash::of(&downloaded.file),
                &downloaded.proof,
                root
            ));
        }
    }

    #[test]
    fn test_tampered_file_record_fails_verification() {
        let store = store();
        let root = store.upload(vec![b"a".to_vec(), b"b".to_vec()], None).unwrap();

        let downloaded = store.download(root, 0).unwrap();
        let tampered = b"not-a".to_vec();
        assert!(!custody_merkle::verify(
            LeafHash::of(&tampered),
            &downloaded.proof,
            root
        ));
    }

    #[test]
    fn test_close_is_idempotent() {
        let store = store();
        store.close().unwrap();
        store.close().unwrap();
    }
}
