//! `ccsync history`

use crate::config::CcsyncPaths;
use crate::display::format_history;
use crate::error::CcsyncResult;
use crate::history::HistoryLog;

/// Show recent history, newest first
///
/// Does not need settings: entries for removed projects stay visible.
pub fn handle_history(paths: &CcsyncPaths, project: Option<&str>, limit: usize) -> CcsyncResult<()> {
    let log = HistoryLog::new(paths.history_file());
    let entries = log.entries(project, Some(limit))?;

    print!("{}", format_history(&entries));
    Ok(())
}
