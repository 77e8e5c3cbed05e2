//! Sync orchestrator
//!
//! Drives the backup writer and pruner over a list of discovered files.
//! Files are processed one at a time; a failure on one file is recorded in
//! the outcome and the batch moves on.

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CcsyncError, CcsyncResult};
use crate::versioning::{prune_versions, write_versioned, VersioningStrategy};

/// Versioning policy for one sync unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    pub strategy: VersioningStrategy,
    /// Versions kept per file; 0 disables pruning
    pub keep_versions: usize,
}

impl SyncPolicy {
    pub fn new(strategy: VersioningStrategy, keep_versions: usize) -> Self {
        Self {
            strategy,
            keep_versions,
        }
    }
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self::new(VersioningStrategy::None, 5)
    }
}

/// Aggregate result of syncing one unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// True iff no file failed
    pub succeeded: bool,
    /// Files handed to the orchestrator
    pub files_found: usize,
    /// Files written (unchanged files are not counted)
    pub files_synced: usize,
    /// One message per failed file, in processing order
    pub errors: Vec<String>,
}

impl SyncOutcome {
    fn new(files_found: usize) -> Self {
        Self {
            succeeded: true,
            files_found,
            files_synced: 0,
            errors: Vec::new(),
        }
    }

    /// Files that needed no write
    pub fn files_unchanged(&self) -> usize {
        self.files_found
            .saturating_sub(self.files_synced)
            .saturating_sub(self.errors.len())
    }

    /// One-line summary for reporting
    pub fn summary(&self) -> String {
        if self.succeeded {
            format!(
                "Synced {} of {} file(s), {} unchanged",
                self.files_synced,
                self.files_found,
                self.files_unchanged()
            )
        } else {
            format!(
                "Synced {} of {} file(s), {} failed",
                self.files_synced,
                self.files_found,
                self.errors.len()
            )
        }
    }

    fn record_failure(&mut self, file: &Path, err: &CcsyncError) {
        self.succeeded = false;
        self.errors
            .push(format!("Failed to sync {}: {}", file.display(), err));
    }
}

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileAction {
    Unchanged,
    Written,
}

/// Sync `files` from under `source_root` into `destination_root`
///
/// Never fails as a whole: per-file errors are collected in the outcome.
pub fn sync_files(
    files: &[PathBuf],
    source_root: &Path,
    destination_root: &Path,
    policy: &SyncPolicy,
) -> SyncOutcome {
    sync_files_with(files, source_root, destination_root, policy, prune_versions)
}

fn sync_files_with<P>(
    files: &[PathBuf],
    source_root: &Path,
    destination_root: &Path,
    policy: &SyncPolicy,
    prune: P,
) -> SyncOutcome
where
    P: Fn(&Path, usize) -> CcsyncResult<usize>,
{
    let mut outcome = SyncOutcome::new(files.len());

    for file in files {
        match sync_file(file, source_root, destination_root, policy, &prune) {
            Ok(FileAction::Written) => outcome.files_synced += 1,
            Ok(FileAction::Unchanged) => {}
            Err(e) => {
                debug!(file = %file.display(), error = %e, "sync failed");
                outcome.record_failure(file, &e);
            }
        }
    }

    outcome
}

fn sync_file<P>(
    source: &Path,
    source_root: &Path,
    destination_root: &Path,
    policy: &SyncPolicy,
    prune: &P,
) -> CcsyncResult<FileAction>
where
    P: Fn(&Path, usize) -> CcsyncResult<usize>,
{
    let destination = destination_for(source, source_root, destination_root)?;

    if files_identical(source, &destination) {
        debug!(file = %source.display(), "unchanged, skipping");
        return Ok(FileAction::Unchanged);
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CcsyncError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    write_versioned(source, &destination, policy.strategy)?;
    debug!(
        from = %source.display(),
        to = %destination.display(),
        strategy = %policy.strategy,
        "written"
    );

    if policy.strategy.keeps_history() {
        match prune(&destination, policy.keep_versions) {
            Ok(0) => {}
            Ok(n) => debug!(file = %destination.display(), pruned = n, "pruned old versions"),
            Err(e) => warn!(file = %destination.display(), error = %e, "pruning skipped"),
        }
    }

    Ok(FileAction::Written)
}

/// Re-root `file` from `source_root` onto `destination_root`
pub fn destination_for(
    file: &Path,
    source_root: &Path,
    destination_root: &Path,
) -> CcsyncResult<PathBuf> {
    let relative = file.strip_prefix(source_root).map_err(|_| {
        CcsyncError::Validation(format!(
            "{} is not under {}",
            file.display(),
            source_root.display()
        ))
    })?;
    Ok(destination_root.join(relative))
}

/// True iff both files exist and have byte-identical content
///
/// Any read failure counts as "different", so the file gets rewritten.
pub fn files_identical(a: &Path, b: &Path) -> bool {
    compare_files(a, b).unwrap_or(false)
}

fn compare_files(a: &Path, b: &Path) -> std::io::Result<bool> {
    let meta_a = fs::metadata(a)?;
    let meta_b = match fs::metadata(b) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if !meta_b.is_file() || meta_a.len() != meta_b.len() {
        return Ok(false);
    }

    let mut reader_a = BufReader::new(File::open(a)?);
    let mut reader_b = BufReader::new(File::open(b)?);
    let mut buf_a = [0u8; 8192];
    let mut buf_b = [0u8; 8192];

    loop {
        let n = reader_a.read(&mut buf_a)?;
        if n == 0 {
            // Same length was checked up front; confirm b is exhausted too
            return Ok(reader_b.read(&mut buf_b[..1])? == 0);
        }
        reader_b.read_exact(&mut buf_b[..n])?;
        if buf_a[..n] != buf_b[..n] {
            return Ok(false);
        }
    }
}
