//! Whole-file JSON persistence with atomic replacement.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::trace;

use crate::error::{Result, StoreError};

/// Replaces the file at `path` with `data`.
///
/// The bytes land in a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new
/// content. Missing parent directories are created.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| StoreError::DirectoryError {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source: std::io::Error| StoreError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    temp_file.write_all(data).map_err(write_err)?;
    temp_file.as_file().sync_all().map_err(write_err)?;
    temp_file.persist(path).map_err(|e| write_err(e.error))?;

    trace!(path = %path.display(), bytes = data.len(), "Replaced file");
    Ok(())
}

/// Serializes `value` as indented JSON and writes it atomically.
pub fn write_json_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())
}

/// Reads and deserializes JSON, returning `None` if the file doesn't exist.
pub fn read_json_if_exists<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::ReadError {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(Some(serde_json::from_str(&data)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Ledger {
        title: String,
        total: f64,
    }

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/projects.json");

        write_atomic(&path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_atomic_overwrites_in_full() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");

        write_atomic(&path, b"a much longer first version").unwrap();
        write_atomic(&path, b"short").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");

        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_json_is_indented() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let ledger = Ledger {
            title: "Sunset".to_string(),
            total: 12.5,
        };

        write_json_atomic(&path, &ledger).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"title\": \"Sunset\""));
        let loaded: Option<Ledger> = read_json_if_exists(&path).unwrap();
        assert_eq!(loaded, Some(ledger));
    }

    #[test]
    fn test_read_json_if_exists_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let result: Option<Ledger> = read_json_if_exists(&path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_json_if_exists_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Option<Ledger>> = read_json_if_exists(&path);
        assert!(matches!(result, Err(StoreError::SerializeError(_))));
    }
}
