//! Sync units: one project, or the global Claude backup
//!
//! A unit discovers its files, locks its destination tree, and hands the
//! file list to the orchestrator. Failures before the first file is
//! processed abort the unit and are returned as errors.

use std::path::Path;

use tracing::info;

use super::engine::{sync_files, SyncOutcome, SyncPolicy};
use super::lock::DestinationLock;
use crate::config::{absolute, Project};
use crate::discovery::{discover, discover_global, ScanOptions};
use crate::error::CcsyncResult;

/// Sync one project into its destination
///
/// The destination is the project's own override, or
/// `<default_destination>/<project name>`.
pub fn sync_project(project: &Project, default_destination: &Path) -> CcsyncResult<SyncOutcome> {
    let destination = project.destination_under(default_destination);
    // Discovery yields absolute paths; the root must match for re-rooting
    let source = absolute(&project.source)?;
    let options = ScanOptions {
        include_git_ignored: project.include_git_ignored,
        backup_types: project.backup_types,
    };

    let files = discover(&source, &options)?;
    let _lock = DestinationLock::acquire(&destination)?;

    let policy = SyncPolicy::new(project.versioning_strategy, project.keep_versions);
    let outcome = sync_files(&files, &source, &destination, &policy);

    info!(
        project = %project.name,
        found = outcome.files_found,
        synced = outcome.files_synced,
        failed = outcome.errors.len(),
        "project synced"
    );
    Ok(outcome)
}

/// Back up everything under Claude's global projects directory
pub fn sync_global(
    projects_dir: &Path,
    destination: &Path,
    policy: &SyncPolicy,
) -> CcsyncResult<SyncOutcome> {
    let projects_dir = absolute(projects_dir)?;
    let files = discover_global(&projects_dir)?;
    let _lock = DestinationLock::acquire(destination)?;

    let outcome = sync_files(&files, &projects_dir, destination, policy);

    info!(
        found = outcome.files_found,
        synced = outcome.files_synced,
        failed = outcome.errors.len(),
        "global backup finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CcsyncError;
    use crate::sync::lock::LOCK_FILE_NAME;
    use crate::versioning::{list_versions, VersioningStrategy};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project(source: PathBuf) -> Project {
        Project::new("test-project", source)
    }

    #[test]
    fn test_sync_project_default_destination() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let dest = temp.path().join("dest");
        write(&source, "claude.md", "# Root");
        write(&source, "docs/claude.md", "# Docs");
        write(&source, "src/claude.md", "# Src");

        let outcome = sync_project(&project(source), &dest).unwrap();

        assert!(outcome.succeeded);
        assert_eq!(outcome.files_synced, 3);
        let root = dest.join("test-project");
        assert_eq!(fs::read_to_string(root.join("docs/claude.md")).unwrap(), "# Docs");
        assert!(root.join(LOCK_FILE_NAME).exists());
    }

    #[test]
    fn test_sync_project_custom_destination() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let custom = temp.path().join("custom");
        write(&source, "claude.md", "# Test");

        let mut project = project(source);
        project.destination = Some(custom.clone());
        sync_project(&project, &temp.path().join("dest")).unwrap();

        assert!(custom.join("claude.md").exists());
        assert!(!temp.path().join("dest").exists());
    }

    #[test]
    fn test_sync_project_relative_source() {
        let cwd = std::env::current_dir().unwrap();
        let temp = TempDir::new_in(&cwd).unwrap();
        let relative = temp.path().strip_prefix(&cwd).unwrap().to_path_buf();
        let source = relative.join("src");
        assert!(source.is_relative());
        write(&source, "claude.md", "# Relative");
        write(&source, "nested/CLAUDE.md", "# Nested");

        let dest = temp.path().join("dest");
        let outcome = sync_project(&project(source), &dest).unwrap();

        assert!(outcome.succeeded, "{:?}", outcome.errors);
        assert_eq!(outcome.files_synced, 2);
        let root = dest.join("test-project");
        assert_eq!(fs::read_to_string(root.join("claude.md")).unwrap(), "# Relative");
        assert!(root.join("nested/CLAUDE.md").exists());
    }

    #[test]
    fn test_sync_project_missing_source_is_top_level_error() {
        let temp = TempDir::new().unwrap();
        let err = sync_project(&project(temp.path().join("missing")), temp.path()).unwrap_err();
        assert!(matches!(err, CcsyncError::PathMissing(_)));
        assert!(err.to_string().contains("Directory does not exist"));
    }

    #[test]
    fn test_sync_project_versioned_rerun() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let dest = temp.path().join("dest");
        write(&source, "claude.md", "one");

        let mut project = project(source.clone());
        project.versioning_strategy = VersioningStrategy::Incremental;
        project.keep_versions = 3;

        sync_project(&project, &dest).unwrap();
        let unchanged = sync_project(&project, &dest).unwrap();
        assert_eq!(unchanged.files_synced, 0);

        write(&source, "claude.md", "two");
        let changed = sync_project(&project, &dest).unwrap();
        assert_eq!(changed.files_synced, 1);

        let target = dest.join("test-project").join("claude.md");
        let versions = list_versions(&target).unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version, "001");
        assert_eq!(fs::read_to_string(&versions[0].path).unwrap(), "one");
    }

    #[test]
    fn test_sync_project_while_locked() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let dest = temp.path().join("dest");
        write(&source, "claude.md", "x");

        let _held = DestinationLock::acquire(&dest.join("test-project")).unwrap();
        let err = sync_project(&project(source), &dest).unwrap_err();
        assert!(matches!(err, CcsyncError::Locked(_)));
    }

    #[test]
    fn test_sync_global() {
        let temp = TempDir::new().unwrap();
        let projects = temp.path().join("projects");
        let dest = temp.path().join("global");
        write(&projects, "-home-me-web/abc.jsonl", "{}");
        write(&projects, ".DS_Store", "junk");

        let policy = SyncPolicy::new(VersioningStrategy::Timestamp, 10);
        let outcome = sync_global(&projects, &dest, &policy).unwrap();

        assert!(outcome.succeeded);
        assert_eq!(outcome.files_synced, 1);
        assert!(dest.join("-home-me-web/abc.jsonl").exists());
        assert!(!dest.join(".DS_Store").exists());

        assert!(sync_global(&temp.path().join("nope"), &dest, &policy).is_err());
    }
}
