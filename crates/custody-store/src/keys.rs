//! The three key families a commitment is stored under.
//!
//! `R` is the 64-character hex root; `H` is the 64-character hex leaf hash.
//! None of these keys use a separator between `R` and `H`, or padding on
//! the decimal index: both are fixed- or self-delimiting widths, so this
//! is unambiguous, and it's the wire-compatible layout this store commits
//! to. Centralizing the formatting here means there is exactly one place
//! that knows it.

pub const FILE_PREFIX: &str = "file_";
pub const PROOF_PREFIX: &str = "proof_";

pub fn file_key(root_hex: &str, leaf_hex: &str) -> Vec<u8> {
    format!("{FILE_PREFIX}{root_hex}{leaf_hex}").into_bytes()
}

pub fn proof_key(root_hex: &str, leaf_hex: &str) -> Vec<u8> {
    format!("{PROOF_PREFIX}{root_hex}{leaf_hex}").into_bytes()
}

pub fn index_key(root_hex: &str, index: usize) -> Vec<u8> {
    format!("{root_hex}{index}").into_bytes()
}

pub fn file_prefix(root_hex: &str) -> Vec<u8> {
    format!("{FILE_PREFIX}{root_hex}").into_bytes()
}

pub fn proof_prefix(root_hex: &str) -> Vec<u8> {
    format!("{PROOF_PREFIX}{root_hex}").into_bytes()
}

/// Prefix matching every index key for `root_hex`.
///
/// Deleting by this prefix, rather than by counting up to a leaf count,
/// is what closes the index-key leak described in DESIGN.md: the number
/// of distinct file records under a root can be smaller than the number
/// of index entries that point at them, when the committed file set
/// contains duplicate leaves.
pub fn index_prefix(root_hex: &str) -> Vec<u8> {
    root_hex.as_bytes().to_vec()
}

/// Strips the `file_<root_hex>` prefix from a full file key, returning the
/// leaf hex. Used when reconstructing the committed file set from a
/// prefix scan during `update`.
pub fn leaf_hex_from_file_key(key: &[u8], root_hex: &str) -> Option<String> {
    let prefix = file_prefix(root_hex);
    key.strip_prefix(prefix.as_slice())
        .map(|rest| String::from_utf8_lossy(rest).into_owned())
}
