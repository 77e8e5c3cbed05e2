//! History display formatting

use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::history::HistoryEntry;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Files")]
    files: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        let files = match (entry.files_synced, entry.files_count) {
            (Some(synced), Some(found)) => format!("{}/{}", synced, found),
            (None, Some(found)) => found.to_string(),
            _ => "-".to_string(),
        };

        Self {
            time: entry
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            action: entry.action.to_string(),
            project: entry.project.clone().unwrap_or_else(|| "-".to_string()),
            files,
            status: if entry.success { "ok" } else { "failed" }.to_string(),
        }
    }
}

/// Format history entries as a table, followed by failure details
pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No history entries found\n".to_string();
    }

    let rows: Vec<HistoryRow> = entries.iter().map(HistoryRow::from).collect();
    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');

    let failures: Vec<&HistoryEntry> = entries
        .iter()
        .filter(|e| !e.success && e.details.is_some())
        .collect();
    if !failures.is_empty() {
        output.push_str("\nErrors:\n");
        for entry in failures {
            output.push_str(&format!(
                "  [{}] {}: {}\n",
                entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
                entry.project.as_deref().unwrap_or("-"),
                entry.details.as_deref().unwrap_or_default()
            ));
        }
    }

    output
}
