//! Advisory lock on a destination tree
//!
//! Two sync runs writing the same tree could interleave rename/copy pairs
//! and corrupt version numbering. Each run takes an exclusive `fs2` lock on
//! a file in the destination root for its whole duration.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::error::{CcsyncError, CcsyncResult};

/// Name of the lock file kept in each destination root
pub const LOCK_FILE_NAME: &str = ".ccsync.lock";

/// Held for as long as a sync run owns the destination
///
/// The lock is released when this value is dropped. The lock file itself
/// stays on disk; removing it would let a waiting run lock a stale inode.
#[derive(Debug)]
pub struct DestinationLock {
    file: File,
    path: PathBuf,
}

impl DestinationLock {
    /// Lock `destination_root`, creating it if needed
    ///
    /// # Errors
    ///
    /// `Locked` if another run holds the lock, `Io` if the root or the lock
    /// file cannot be created.
    pub fn acquire(destination_root: &Path) -> CcsyncResult<Self> {
        fs::create_dir_all(destination_root).map_err(|e| {
            CcsyncError::Io(format!(
                "Failed to create destination {}: {}",
                destination_root.display(),
                e
            ))
        })?;

        let path = destination_root.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                CcsyncError::Io(format!("Failed to open lock file {}: {}", path.display(), e))
            })?;

        file.try_lock_exclusive().map_err(|e| {
            if e.kind() == fs2::lock_contended_error().kind() {
                CcsyncError::Locked(destination_root.to_path_buf())
            } else {
                CcsyncError::Io(format!("Failed to lock {}: {}", path.display(), e))
            }
        })?;

        debug!(path = %path.display(), "acquired destination lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DestinationLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
