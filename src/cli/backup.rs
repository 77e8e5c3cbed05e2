//! `ccsync backup-global`
//!
//! Backs up Claude's global per-project data (`~/.claude/projects`) as its
//! own sync unit, with timestamp versioning by default.

use clap::Args;
use std::path::PathBuf;

use super::sync::print_outcome;
use super::{record_history, resolve_path};
use crate::config::{CcsyncPaths, Settings};
use crate::discovery::discover_global;
use crate::error::{CcsyncError, CcsyncResult};
use crate::history::{HistoryAction, HistoryEntry, HistoryLog};
use crate::sync::{sync_global, SyncPolicy};
use crate::versioning::VersioningStrategy;

/// Subdirectory of the sync destination used by default
pub const GLOBAL_BACKUP_DIR: &str = "global-claude-backup";

/// Arguments for `ccsync backup-global`
#[derive(Args, Debug)]
pub struct BackupGlobalArgs {
    /// Custom destination (default: <syncDestination>/global-claude-backup)
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Versioning strategy: none, timestamp, incremental
    #[arg(long, default_value = "timestamp")]
    pub versioning: String,

    /// Number of versions to keep per file (0 = never prune)
    #[arg(long, default_value_t = 10)]
    pub keep_versions: usize,

    /// Show what would be backed up without doing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle `ccsync backup-global`
pub fn handle_backup_global(paths: &CcsyncPaths, args: BackupGlobalArgs) -> CcsyncResult<()> {
    let settings = Settings::load(paths)?;

    let destination = match args.destination {
        Some(d) => resolve_path(&d)?,
        None => settings.sync_destination.join(GLOBAL_BACKUP_DIR),
    };
    let strategy: VersioningStrategy = args.versioning.parse()?;
    let policy = SyncPolicy::new(strategy, args.keep_versions);
    let projects_dir = paths.claude_projects();

    if args.dry_run {
        let files = discover_global(&projects_dir)?;
        println!("Found {} files in {}", files.len(), projects_dir.display());
        println!();
        println!("Dry run - files that would be backed up:");
        for file in &files {
            let shown = file.strip_prefix(&projects_dir).unwrap_or(file);
            println!("  {}", shown.display());
        }
        println!();
        println!("Destination: {}", destination.display());
        println!("Versioning: {}", strategy);
        if strategy.keeps_history() {
            println!("Keep versions: {}", policy.keep_versions);
        }
        return Ok(());
    }

    println!("Backing up global Claude configuration...");
    let outcome = sync_global(&projects_dir, &destination, &policy)?;

    record_history(
        &HistoryLog::new(paths.history_file()),
        HistoryEntry::from_outcome(HistoryAction::BackupGlobal, "global", &outcome),
    );

    print_outcome(&outcome);
    println!("Destination: {}", destination.display());

    if !outcome.succeeded {
        return Err(CcsyncError::SyncFailed {
            failed: 1,
            total: 1,
        });
    }
    Ok(())
}
