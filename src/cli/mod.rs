//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the config, sync, and history layers.

pub mod backup;
pub mod history;
pub mod init;
pub mod project;
pub mod status;
pub mod sync;

pub use backup::{handle_backup_global, BackupGlobalArgs};
pub use history::handle_history;
pub use init::handle_init;
pub use project::{handle_add_project, handle_remove_project, AddProjectArgs};
pub use status::handle_status;
pub use sync::handle_sync;

use std::path::{Path, PathBuf};

use crate::error::CcsyncResult;
use crate::history::{HistoryEntry, HistoryLog};

/// Make a user-supplied path absolute against the working directory
pub(crate) fn resolve_path(path: &Path) -> CcsyncResult<PathBuf> {
    crate::config::absolute(path)
}

/// Append to history, warning instead of failing the command
pub(crate) fn record_history(log: &HistoryLog, entry: HistoryEntry) {
    if let Err(e) = log.append(entry) {
        tracing::warn!(error = %e, "failed to save history");
        eprintln!("Warning: Failed to save history: {}", e);
    }
}
