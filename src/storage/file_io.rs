//! JSON file I/O with atomic writes
//!
//! Settings and history are rewritten whole on every change; writes go to a
//! temp file in the same directory and are renamed over the target.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CcsyncError, CcsyncResult};

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> CcsyncResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(CcsyncError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CcsyncError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read JSON from a file that must exist
///
/// A missing file is `NotFound`; malformed content is a `Json` error.
pub fn read_json_required<T, P>(path: P) -> CcsyncResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CcsyncError::NotFound {
                entity_type: "File",
                identifier: path.display().to_string(),
            })
        }
        Err(e) => {
            return Err(CcsyncError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CcsyncError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// Parent directories are created as needed.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> CcsyncResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CcsyncError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| CcsyncError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| CcsyncError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| CcsyncError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| CcsyncError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CcsyncError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    Ok(())
}

/// `.<name>.<pid>.tmp` next to the target, so the rename stays on one filesystem
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn sample() -> TestData {
        TestData {
            name: "test".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: TestData = read_json(temp_dir.path().join("nonexistent.json")).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &sample()).unwrap();
        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &sample()).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("test.json")]);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_required() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let err = read_json_required::<TestData, _>(&path).unwrap_err();
        assert!(err.is_not_found());

        write_json_atomic(&path, &sample()).unwrap();
        let loaded: TestData = read_json_required(&path).unwrap();
        assert_eq!(loaded, sample());

        fs::write(&path, "{\"name\": 1}").unwrap();
        let err = read_json_required::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, CcsyncError::Json(_)));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, CcsyncError::Storage(_)));
    }
}
