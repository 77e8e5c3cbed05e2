//! Backup writer
//!
//! Copies a source file onto its destination, first moving any existing
//! destination aside under a version name when the strategy keeps history.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::catalog::list_versions;
use super::namer::next_version_name;
use super::VersioningStrategy;
use crate::error::{CcsyncError, CcsyncResult};

/// Write `source` to `destination`, versioning the old destination first
///
/// Returns the destination path. The rename and the copy are not atomic as a
/// pair: if the copy fails after a successful rename, the old content only
/// survives under its version name.
pub fn write_versioned(
    source: &Path,
    destination: &Path,
    strategy: VersioningStrategy,
) -> CcsyncResult<PathBuf> {
    if destination.is_dir() {
        return Err(CcsyncError::Io(format!(
            "Destination is a directory: {}",
            destination.display()
        )));
    }

    if strategy.keeps_history() && destination.exists() {
        let versioned = match strategy {
            VersioningStrategy::Incremental => {
                let last = list_versions(destination)?
                    .iter()
                    .filter_map(|v| v.counter())
                    .max()
                    .unwrap_or(0);
                next_version_name(destination, strategy, Some(last + 1))?
            }
            _ => next_version_name(destination, strategy, None)?,
        };

        if versioned.exists() {
            warn!(
                path = %versioned.display(),
                "version name already taken, replacing the earlier version"
            );
        }

        fs::rename(destination, &versioned).map_err(|e| {
            CcsyncError::Io(format!(
                "Failed to move {} to {}: {}",
                destination.display(),
                versioned.display(),
                e
            ))
        })?;
        debug!(from = %destination.display(), to = %versioned.display(), "versioned");
    }

    copy_file(source, destination)?;
    Ok(destination.to_path_buf())
}

fn copy_file(source: &Path, destination: &Path) -> CcsyncResult<()> {
    fs::copy(source, destination).map_err(|e| {
        CcsyncError::Io(format!(
            "Failed to copy {} to {}: {}",
            source.display(),
            destination.display(),
            e
        ))
    })?;
    Ok(())
}
