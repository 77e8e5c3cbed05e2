//! Version pruner
//!
//! Keeps the most recent `keep` versions of a destination file and deletes
//! the rest. Deletion is best-effort: a file that cannot be removed is
//! logged and left in place, and the remaining deletions still run.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use super::catalog::list_versions;
use crate::error::CcsyncResult;

/// Delete versions of `destination` beyond the newest `keep`
///
/// Returns the number of files actually deleted. `keep == 0` disables
/// pruning entirely rather than deleting every version.
pub fn prune_versions(destination: &Path, keep: usize) -> CcsyncResult<usize> {
    prune_with(destination, keep, |path| fs::remove_file(path))
}

fn prune_with<F>(destination: &Path, keep: usize, mut remove: F) -> CcsyncResult<usize>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    if keep == 0 {
        return Ok(0);
    }

    let versions = list_versions(destination)?;
    if versions.len() <= keep {
        return Ok(0);
    }

    let mut deleted = 0;
    for version in versions.into_iter().skip(keep) {
        match remove(&version.path) {
            Ok(()) => {
                debug!(path = %version.path.display(), "pruned version");
                deleted += 1;
            }
            Err(e) => {
                warn!(path = %version.path.display(), error = %e, "failed to prune version");
            }
        }
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_versions(dir: &Path, n: usize) {
        fs::write(dir.join("note.md"), "current").unwrap();
        for i in 0..n {
            // One version per day, oldest first
            let name = format!("note.202401{:02}_120000.md", i + 1);
            fs::write(dir.join(name), format!("v{}", i)).unwrap();
        }
    }

    fn remaining(dir: &Path) -> Vec<String> {
        list_versions(&dir.join("note.md"))
            .unwrap()
            .into_iter()
            .map(|v| v.version)
            .collect()
    }

    #[test]
    fn test_prunes_oldest_beyond_keep() {
        let temp = TempDir::new().unwrap();
        make_versions(temp.path(), 5);

        let deleted = prune_versions(&temp.path().join("note.md"), 2).unwrap();
        assert_eq!(deleted, 3);
        assert_eq!(remaining(temp.path()), vec!["20240105_120000", "20240104_120000"]);
        assert!(temp.path().join("note.md").exists());
    }

    #[test]
    fn test_keep_zero_is_noop() {
        let temp = TempDir::new().unwrap();
        make_versions(temp.path(), 4);

        assert_eq!(prune_versions(&temp.path().join("note.md"), 0).unwrap(), 0);
        assert_eq!(remaining(temp.path()).len(), 4);
    }

    #[test]
    fn test_pruning_bound() {
        for n in 0..6 {
            for k in 0..7 {
                let temp = TempDir::new().unwrap();
                make_versions(temp.path(), n);

                let deleted = prune_versions(&temp.path().join("note.md"), k).unwrap();
                let left = remaining(temp.path()).len();

                if k == 0 {
                    assert_eq!(deleted, 0);
                    assert_eq!(left, n);
                } else {
                    assert_eq!(deleted, n.saturating_sub(k), "n={} k={}", n, k);
                    assert_eq!(left, n.min(k), "n={} k={}", n, k);
                }
            }
        }
    }

    #[test]
    fn test_failed_removal_is_skipped() {
        let temp = TempDir::new().unwrap();
        make_versions(temp.path(), 5);
        let stuck = temp.path().join("note.20240103_120000.md");

        let mut attempted = Vec::new();
        let deleted = prune_with(&temp.path().join("note.md"), 1, |path| {
            attempted.push(path.to_path_buf());
            if path == stuck.as_path() {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            fs::remove_file(path)
        })
        .unwrap();

        // Every candidate was tried, and only real deletions are counted
        assert_eq!(attempted.len(), 4);
        assert_eq!(deleted, 3);
        assert_eq!(remaining(temp.path()), vec!["20240105_120000", "20240103_120000"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_version_replaced_by_directory() {
        let temp = TempDir::new().unwrap();
        make_versions(temp.path(), 3);
        let swapped = temp.path().join("note.20240101_120000.md");

        // Entry turns into a non-empty directory after it was listed
        let deleted = prune_with(&temp.path().join("note.md"), 1, |path| {
            if path == swapped.as_path() {
                fs::remove_file(path)?;
                fs::create_dir(path)?;
                fs::write(path.join("inner"), "x")?;
            }
            fs::remove_file(path)
        })
        .unwrap();

        assert_eq!(deleted, 1);
        assert!(swapped.is_dir());
        assert!(!temp.path().join("note.20240102_120000.md").exists());
        assert!(temp.path().join("note.20240103_120000.md").exists());
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("gone").join("note.md");
        assert_eq!(prune_versions(&dest, 3).unwrap(), 0);
    }
}
