//! `ccsync sync` / `ccsync sync-all`

use super::record_history;
use crate::config::{CcsyncPaths, Project, Settings};
use crate::error::{CcsyncError, CcsyncResult};
use crate::history::{HistoryAction, HistoryEntry, HistoryLog};
use crate::hooks::run_post_sync;
use crate::sync::{sync_project, SyncOutcome};

/// Sync one named project, or every project when `project` is None
///
/// Each project is reported and recorded in history on its own; a failing
/// project does not stop the others. The post-sync hook runs once at the
/// end either way.
pub fn handle_sync(paths: &CcsyncPaths, project: Option<&str>) -> CcsyncResult<()> {
    let settings = Settings::load(paths)?;
    let log = HistoryLog::new(paths.history_file());

    let selected: Vec<&Project> = match project {
        Some(name) => vec![settings
            .find_project(name)
            .ok_or_else(|| CcsyncError::project_not_found(name))?],
        None => settings.projects.iter().collect(),
    };

    if selected.is_empty() {
        println!("No projects configured");
        return Ok(());
    }

    let mut failed = 0;
    for project in &selected {
        println!("Syncing project: {}", project.name);

        match sync_project(project, &settings.sync_destination) {
            Ok(outcome) => {
                record_history(
                    &log,
                    HistoryEntry::from_outcome(HistoryAction::Sync, &project.name, &outcome),
                );
                if !outcome.succeeded {
                    failed += 1;
                }
                print_outcome(&outcome);
            }
            Err(e) => {
                failed += 1;
                record_history(
                    &log,
                    HistoryEntry::new(HistoryAction::Sync, false)
                        .with_project(&project.name)
                        .with_details(e.to_string()),
                );
                println!("  Sync failed: {}", e);
            }
        }
    }

    if let Err(e) = log.cleanup(settings.history_retention) {
        tracing::warn!(error = %e, "history cleanup failed");
    }

    if let Some(hook) = settings.post_sync_hook() {
        println!("Running post-sync hook...");
        run_post_sync(hook)?;
    }

    if failed > 0 {
        return Err(CcsyncError::SyncFailed {
            failed,
            total: selected.len(),
        });
    }
    Ok(())
}

pub(crate) fn print_outcome(outcome: &SyncOutcome) {
    if outcome.succeeded {
        println!("  {}", outcome.summary());
    } else {
        println!("  Sync completed with errors ({}):", outcome.summary());
        for err in &outcome.errors {
            println!("    - {}", err);
        }
    }
}
