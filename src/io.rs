//! File helpers shared by the loader, the report writer and the renderer.
//!
//! - `read_json_file`: deserialize a JSON file, distinguishing a missing file
//!   from a malformed one.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `ensure_parent_dir`: create the parent directory of an output path.
use crate::error::{PlanError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read `path` and deserialize its JSON content.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            PlanError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            PlanError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&data).map_err(|source| PlanError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| PlanError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PlanError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn missing_file_maps_to_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = read_json_file::<BTreeMap<String, u32>>(&path).unwrap_err();
        assert!(matches!(err, PlanError::NotFound { .. }));
    }

    #[test]
    fn malformed_file_maps_to_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_json_file::<BTreeMap<String, u32>>(&path).unwrap_err();
        assert!(matches!(err, PlanError::Format { .. }));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/value.json");
        let mut value = BTreeMap::new();
        value.insert("k".to_string(), 3u32);
        write_json_file(&path, &value).unwrap();
        let back: BTreeMap<String, u32> = read_json_file(&path).unwrap();
        assert_eq!(back, value);
    }
}
