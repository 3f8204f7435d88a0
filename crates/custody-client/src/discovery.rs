//! Turns `--dir`/`--files` into an ordered list of file contents, and
//! deletes the same paths again once an upload has been audited.
//!
//! Order matters: the index a file gets here is the index the server
//! commits it under, so `-dir` recurses in `walkdir`'s default
//! depth-first, lexicographically-sorted-per-directory order and `-files`
//! preserves the comma-separated order the caller gave.

use crate::error::ClientError;
use std::path::{Path, PathBuf};

/// A file discovered on disk, kept alongside its path so it can be
/// deleted again after a successful audit.
pub struct LocalFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Resolves `--dir` and/or `--files` into an ordered list of files.
///
/// Mirrors the original CLI's precedence: `--files`, if given, is used
/// instead of `--dir` rather than in addition to it.
pub fn discover(dir: Option<&str>, files: Option<&str>) -> Result<Vec<LocalFile>, ClientError> {
    let discovered = if let Some(list) = files.filter(|s| !s.is_empty()) {
        from_file_list(list)?
    } else if let Some(dir) = dir.filter(|s| !s.is_empty()) {
        from_dir(dir)?
    } else {
        return Err(ClientError::NoFilesProvided);
    };

    if discovered.is_empty() {
        return Err(ClientError::EmptyFileSet);
    }

    Ok(discovered)
}

fn from_file_list(list: &str) -> Result<Vec<LocalFile>, ClientError> {
    let mut files = Vec::new();
    for raw in list.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let path = Path::new(trimmed).canonicalize()?;
        let contents = std::fs::read(&path)?;
        files.push(LocalFile { path, contents });
    }
    Ok(files)
}

fn from_dir(dir: &str) -> Result<Vec<LocalFile>, ClientError> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            let contents = std::fs::read(entry.path())?;
            files.push(LocalFile {
                path: entry.path().to_path_buf(),
                contents,
            });
        }
    }
    Ok(files)
}

/// Deletes every discovered file's path from disk. Called only after an
/// upload or update has been fully audited.
pub fn delete_all(files: &[LocalFile]) -> Result<(), ClientError> {
    for file in files {
        std::fs::remove_file(&file.path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dir_and_no_files_is_an_error() {
        assert!(matches!(discover(None, None), Err(ClientError::NoFilesProvided)));
    }

    #[test]
    fn test_files_list_preserves_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let path_a = dir.path().join("a.txt");
        let path_b = dir.path().join("b.txt");
        std::fs::write(&path_a, b"aaa").unwrap();
        std::fs::write(&path_b, b"bbb").unwrap();

        let list = format!("{},{}", path_b.display(), path_a.display());
        let found = discover(None, Some(&list)).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].contents, b"bbb");
        assert_eq!(found[1].contents, b"aaa");
    }

    #[test]
    fn test_dir_recurses_and_sorts_lexicographically() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/c.txt"), b"c").unwrap();

        let found = discover(Some(dir.path().to_str().unwrap()), None).unwrap();
        let contents: Vec<&[u8]> = found.iter().map(|f| f.contents.as_slice()).collect();

        assert_eq!(contents, vec![b"a" as &[u8], b"b" as &[u8], b"c" as &[u8]]);
    }

    #[test]
    fn test_empty_directory_is_an_empty_file_set_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover(Some(dir.path().to_str().unwrap()), None),
            Err(ClientError::EmptyFileSet)
        ));
    }

    #[test]
    fn test_delete_all_removes_every_discovered_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        std::fs::write(&path, b"x").unwrap();

        let found = discover(None, Some(path.to_str().unwrap())).unwrap();
        delete_all(&found).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_files_flag_takes_precedence_over_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ignored.txt"), b"ignored").unwrap();
        let explicit = dir.path().join("explicit.txt");
        std::fs::write(&explicit, b"explicit").unwrap();

        let found = discover(
            Some(dir.path().to_str().unwrap()),
            Some(explicit.to_str().unwrap()),
        )
        .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].contents, b"explicit");
    }
}
