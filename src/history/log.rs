//! History log stored as a JSON array
//!
//! The whole file is read, modified, and rewritten atomically on each
//! append. A missing file is an empty history.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};

use super::entry::HistoryEntry;
use crate::error::CcsyncResult;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Reads and writes the history file
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All entries in file order (oldest first)
    pub fn read_all(&self) -> CcsyncResult<Vec<HistoryEntry>> {
        read_json(&self.path)
    }

    /// Append one entry
    pub fn append(&self, entry: HistoryEntry) -> CcsyncResult<()> {
        let mut entries = self.read_all()?;
        entries.push(entry);
        write_json_atomic(&self.path, &entries)
    }

    /// Entries newest first, optionally filtered by project and limited
    pub fn entries(
        &self,
        project: Option<&str>,
        limit: Option<usize>,
    ) -> CcsyncResult<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> = self
            .read_all()?
            .into_iter()
            .filter(|e| project.map_or(true, |p| e.project.as_deref() == Some(p)))
            .collect();

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    /// Drop entries older than `retention_days`, returning how many were removed
    pub fn cleanup(&self, retention_days: u32) -> CcsyncResult<usize> {
        let entries = self.read_all()?;
        let before = entries.len();

        let cutoff = Utc::now() - Duration::days(i64::from(retention_days));
        let kept: Vec<HistoryEntry> = entries
            .into_iter()
            .filter(|e| e.timestamp > cutoff)
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            write_json_atomic(&self.path, &kept)?;
        }
        Ok(removed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
