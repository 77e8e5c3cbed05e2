//! History entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sync::SyncOutcome;

/// Kinds of actions recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryAction {
    Sync,
    Init,
    AddProject,
    RemoveProject,
    BackupGlobal,
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryAction::Sync => write!(f, "sync"),
            HistoryAction::Init => write!(f, "init"),
            HistoryAction::AddProject => write!(f, "add-project"),
            HistoryAction::RemoveProject => write!(f, "remove-project"),
            HistoryAction::BackupGlobal => write!(f, "backup-global"),
        }
    }
}

/// A single history record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// When the action finished (UTC)
    pub timestamp: DateTime<Utc>,

    pub action: HistoryAction,

    /// Project name, or "global" for global backups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Files found by discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_count: Option<usize>,

    /// Files actually written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_synced: Option<usize>,

    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time
    pub fn new(action: HistoryAction, success: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            project: None,
            files_count: None,
            files_synced: None,
            success,
            details: None,
        }
    }

    /// Record the outcome of one sync unit
    pub fn from_outcome(action: HistoryAction, project: &str, outcome: &SyncOutcome) -> Self {
        let mut entry = Self::new(action, outcome.succeeded)
            .with_project(project)
            .with_files(outcome.files_found, outcome.files_synced);
        if !outcome.errors.is_empty() {
            entry.details = Some(outcome.errors.join(", "));
        }
        entry
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_files(mut self, found: usize, synced: usize) -> Self {
        self.files_count = Some(found);
        self.files_synced = Some(synced);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
