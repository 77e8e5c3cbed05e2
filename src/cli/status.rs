//! `ccsync status`

use crate::config::{CcsyncPaths, Settings};
use crate::discovery::{discover, ScanOptions};
use crate::display::{format_project_list, ProjectStatus};
use crate::error::CcsyncResult;
use crate::history::HistoryLog;

/// Show configured projects and what a sync would pick up right now
pub fn handle_status(paths: &CcsyncPaths) -> CcsyncResult<()> {
    let settings = Settings::load(paths)?;

    println!("Config file: {}", paths.config_file().display());
    println!("Sync destination: {}", settings.sync_destination.display());
    println!("History retention: {} days", settings.history_retention);
    if let Some(hook) = settings.post_sync_hook() {
        println!("Post-sync hook: {}", hook);
    }
    println!();

    let statuses: Vec<ProjectStatus<'_>> = settings
        .projects
        .iter()
        .map(|project| {
            let options = ScanOptions {
                include_git_ignored: project.include_git_ignored,
                backup_types: project.backup_types,
            };
            ProjectStatus {
                project,
                files_found: discover(&project.source, &options)
                    .map(|files| files.len())
                    .map_err(|e| e.to_string()),
            }
        })
        .collect();

    print!("{}", format_project_list(&statuses, &settings.sync_destination));

    let log = HistoryLog::new(paths.history_file());
    if let Some(last) = log.entries(None, Some(1))?.first() {
        println!();
        println!(
            "Last activity: {} {} ({})",
            last.action,
            last.project.as_deref().unwrap_or(""),
            if last.success { "ok" } else { "failed" }
        );
    }

    Ok(())
}
