//! Project management commands

use clap::Args;
use std::path::PathBuf;

use super::{record_history, resolve_path};
use crate::config::{BackupTypes, CcsyncPaths, Project, Settings};
use crate::error::{CcsyncError, CcsyncResult};
use crate::history::{HistoryAction, HistoryEntry, HistoryLog};
use crate::versioning::VersioningStrategy;

/// Arguments for `ccsync add-project`
#[derive(Args, Debug)]
pub struct AddProjectArgs {
    /// Project name
    #[arg(short, long)]
    pub name: String,

    /// Source directory
    #[arg(short, long)]
    pub source: PathBuf,

    /// Custom destination (default: <syncDestination>/<name>)
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Enable auto-sync for this project
    #[arg(long)]
    pub auto_sync: bool,

    /// Include git-ignored files
    #[arg(long)]
    pub include_git_ignored: bool,

    /// Do not back up claude.md files
    #[arg(long)]
    pub no_claude_md: bool,

    /// Back up ~/.claude/projects data
    #[arg(long)]
    pub backup_claude_projects: bool,

    /// Back up .claude/settings.local.json files
    #[arg(long)]
    pub backup_settings_local: bool,

    /// Versioning strategy: none, timestamp, incremental
    #[arg(long, default_value = "none")]
    pub versioning: String,

    /// Number of versions to keep per file (0 = never prune)
    #[arg(long, default_value_t = 5)]
    pub keep_versions: usize,
}

/// Register a new project
pub fn handle_add_project(paths: &CcsyncPaths, args: AddProjectArgs) -> CcsyncResult<()> {
    let mut settings = Settings::load(paths)?;

    let source = resolve_path(&args.source)?;
    if !source.exists() {
        return Err(CcsyncError::PathMissing(source));
    }
    if !source.is_dir() {
        return Err(CcsyncError::NotADirectory(source));
    }

    let versioning: VersioningStrategy = args.versioning.parse()?;

    let project = Project {
        name: args.name.clone(),
        source,
        destination: args.destination.map(|d| resolve_path(&d)).transpose()?,
        auto_sync: args.auto_sync,
        include_git_ignored: args.include_git_ignored,
        backup_types: BackupTypes {
            claude_md: !args.no_claude_md,
            claude_projects: args.backup_claude_projects,
            settings_local: args.backup_settings_local,
        },
        versioning_strategy: versioning,
        keep_versions: args.keep_versions,
    };

    settings.add_project(project)?;
    settings.save(paths)?;

    record_history(
        &HistoryLog::new(paths.history_file()),
        HistoryEntry::new(HistoryAction::AddProject, true).with_project(&args.name),
    );

    println!("Project '{}' added successfully", args.name);
    Ok(())
}

/// Unregister a project; its backups are left on disk
pub fn handle_remove_project(paths: &CcsyncPaths, name: &str) -> CcsyncResult<()> {
    let mut settings = Settings::load(paths)?;
    let removed = settings.remove_project(name)?;
    settings.save(paths)?;

    record_history(
        &HistoryLog::new(paths.history_file()),
        HistoryEntry::new(HistoryAction::RemoveProject, true).with_project(&removed.name),
    );

    println!("Project '{}' removed", removed.name);
    println!(
        "Backups under {} were not deleted.",
        removed.destination_under(&settings.sync_destination).display()
    );
    Ok(())
}
