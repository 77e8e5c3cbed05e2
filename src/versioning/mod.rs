//! Versioned backups of destination files
//!
//! Before a destination file is overwritten, its previous content can be
//! renamed aside and kept as history. Two naming schemes live side by side:
//!
//! - timestamp: `name.YYYYMMDD_HHMMSS.ext`
//! - incremental: `name.vNNN.ext`
//!
//! # Components
//!
//! - `catalog`: enumerates existing versions of a destination file
//! - `namer`: computes the next version's path
//! - `writer`: renames the old file aside and copies the new one in
//! - `pruner`: deletes versions beyond the retention count

pub mod catalog;
pub mod namer;
pub mod pruner;
pub mod writer;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::CcsyncError;

pub use catalog::list_versions;
pub use namer::{next_version_name, version_name_at, MAX_INCREMENTAL_VERSION};
pub use pruner::prune_versions;
pub use writer::write_versioned;

/// How prior content is preserved when a destination file is overwritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VersioningStrategy {
    /// Overwrite in place, keep no history
    #[default]
    None,
    /// Rename the old file with its replacement instant
    Timestamp,
    /// Rename the old file with the next sequential counter
    Incremental,
}

impl VersioningStrategy {
    /// Whether this strategy keeps any history at all
    pub fn keeps_history(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for VersioningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Incremental => write!(f, "incremental"),
        }
    }
}

impl FromStr for VersioningStrategy {
    type Err = CcsyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "timestamp" => Ok(Self::Timestamp),
            "incremental" => Ok(Self::Incremental),
            other => Err(CcsyncError::Validation(format!(
                "Invalid versioning strategy '{}'. Use: none, timestamp, or incremental",
                other
            ))),
        }
    }
}

/// One backup version of a destination file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedFile {
    /// Full path of the backup file
    pub path: PathBuf,
    /// Version token from the file name (`YYYYMMDD_HHMMSS` or `NNN`)
    pub version: String,
    /// Ordering key: parsed from the token, or the file's mtime for counters
    pub timestamp: DateTime<Local>,
}

impl VersionedFile {
    /// The numeric counter, if this is an incremental version
    pub fn counter(&self) -> Option<u32> {
        if self.version.len() == 3 && self.version.bytes().all(|b| b.is_ascii_digit()) {
            self.version.parse().ok()
        } else {
            None
        }
    }
}

/// Split a destination path into (directory, stem, extension-with-dot)
///
/// `notes/claude.md` gives `("notes", "claude", ".md")`; a dotfile such as
/// `.bashrc` has no extension.
pub(crate) fn name_parts(path: &Path) -> Result<(PathBuf, String, String), CcsyncError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CcsyncError::Validation(format!("Path has no file name: {}", path.display()))
        })?;

    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    Ok((dir, stem, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("none".parse::<VersioningStrategy>().unwrap(), VersioningStrategy::None);
        assert_eq!(
            "Timestamp".parse::<VersioningStrategy>().unwrap(),
            VersioningStrategy::Timestamp
        );
        assert_eq!(
            "incremental".parse::<VersioningStrategy>().unwrap(),
            VersioningStrategy::Incremental
        );

        let err = "daily".parse::<VersioningStrategy>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&VersioningStrategy::Incremental).unwrap();
        assert_eq!(json, "\"incremental\"");
        let parsed: VersioningStrategy = serde_json::from_str("\"timestamp\"").unwrap();
        assert_eq!(parsed, VersioningStrategy::Timestamp);
    }

    #[test]
    fn test_name_parts() {
        let (dir, stem, ext) = name_parts(Path::new("/backup/proj/claude.md")).unwrap();
        assert_eq!(dir, PathBuf::from("/backup/proj"));
        assert_eq!(stem, "claude");
        assert_eq!(ext, ".md");

        let (_, stem, ext) = name_parts(Path::new("/backup/.bashrc")).unwrap();
        assert_eq!(stem, ".bashrc");
        assert_eq!(ext, "");

        let (dir, _, _) = name_parts(Path::new("claude.md")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
    }

    #[test]
    fn test_counter_only_for_incremental_tokens() {
        let mut file = VersionedFile {
            path: PathBuf::from("claude.v007.md"),
            version: "007".into(),
            timestamp: Local::now(),
        };
        assert_eq!(file.counter(), Some(7));

        file.version = "20250101_120000".into();
        assert_eq!(file.counter(), None);
    }
}
