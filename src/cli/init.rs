//! `ccsync init`

use std::path::PathBuf;

use super::{record_history, resolve_path};
use crate::config::{CcsyncPaths, Settings};
use crate::error::CcsyncResult;
use crate::history::{HistoryAction, HistoryEntry, HistoryLog};

/// Write a fresh settings file pointing at `destination`
pub fn handle_init(paths: &CcsyncPaths, destination: Option<PathBuf>) -> CcsyncResult<()> {
    let destination = destination.map(|d| resolve_path(&d)).transpose()?;
    let settings = Settings::init(paths, destination)?;

    record_history(
        &HistoryLog::new(paths.history_file()),
        HistoryEntry::new(HistoryAction::Init, true),
    );

    println!("Configuration initialized successfully");
    println!("Config file: {}", paths.config_file().display());
    println!("Sync destination: {}", settings.sync_destination.display());
    Ok(())
}
