//! User settings for ccsync
//!
//! The persisted `settings.json`: the sync destination, the list of
//! projects with their backup and versioning policies, history retention,
//! and optional hooks.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::{absolute, CcsyncPaths, SYNC_DESTINATION_ENV};
use crate::error::{CcsyncError, CcsyncResult};
use crate::storage::file_io::{read_json_required, write_json_atomic};
use crate::versioning::VersioningStrategy;

/// Which kinds of files a project backs up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupTypes {
    /// `claude.md` / `CLAUDE.md` anywhere in the tree
    #[serde(default = "default_true")]
    pub claude_md: bool,
    /// Claude's global `~/.claude/projects` data
    #[serde(default)]
    pub claude_projects: bool,
    /// `.claude/settings.local.json` anywhere in the tree
    #[serde(default)]
    pub settings_local: bool,
}

impl Default for BackupTypes {
    fn default() -> Self {
        Self {
            claude_md: true,
            claude_projects: false,
            settings_local: false,
        }
    }
}

impl BackupTypes {
    /// Human-readable list of enabled types
    pub fn enabled_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.claude_md {
            labels.push("claude.md");
        }
        if self.claude_projects {
            labels.push("~/.claude/projects");
        }
        if self.settings_local {
            labels.push("settings.local.json");
        }
        labels
    }
}

/// A source project synced into the destination tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub source: PathBuf,
    /// Overrides `<syncDestination>/<name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    #[serde(default)]
    pub auto_sync: bool,
    #[serde(default)]
    pub include_git_ignored: bool,
    #[serde(default)]
    pub backup_types: BackupTypes,
    #[serde(default)]
    pub versioning_strategy: VersioningStrategy,
    #[serde(default = "default_keep_versions")]
    pub keep_versions: usize,
}

impl Project {
    /// Create a project with default policies
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            destination: None,
            auto_sync: false,
            include_git_ignored: false,
            backup_types: BackupTypes::default(),
            versioning_strategy: VersioningStrategy::default(),
            keep_versions: default_keep_versions(),
        }
    }

    /// Where this project's files land
    pub fn destination_under(&self, default_root: &Path) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| default_root.join(&self.name))
    }
}

/// Commands run around a sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hooks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_sync: Option<String>,
}

/// Contents of settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub projects: Vec<Project>,

    pub sync_destination: PathBuf,

    /// Days of sync history to keep
    #[serde(default = "default_history_retention")]
    pub history_retention: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Hooks>,
}

fn default_true() -> bool {
    true
}

fn default_keep_versions() -> usize {
    5
}

fn default_history_retention() -> u32 {
    30
}

impl Settings {
    /// Fresh settings pointing at `sync_destination`
    pub fn new(sync_destination: impl Into<PathBuf>) -> Self {
        Self {
            projects: Vec::new(),
            sync_destination: sync_destination.into(),
            history_retention: default_history_retention(),
            hooks: None,
        }
    }

    /// Write a default settings file
    ///
    /// The destination comes from the argument, falling back to
    /// `CCSYNC_SYNC_DESTINATION`, and is stored as an absolute path.
    pub fn init(paths: &CcsyncPaths, destination: Option<PathBuf>) -> CcsyncResult<Self> {
        let destination = destination
            .or_else(|| std::env::var_os(SYNC_DESTINATION_ENV).map(PathBuf::from))
            .filter(|d| !d.as_os_str().is_empty())
            .ok_or_else(|| {
                CcsyncError::Config(format!(
                    "Sync destination must be specified. Use --destination or set {}.",
                    SYNC_DESTINATION_ENV
                ))
            })?;

        let settings = Settings::new(absolute(&destination)?);
        settings.save(paths)?;
        Ok(settings)
    }

    /// Load settings from disk
    pub fn load(paths: &CcsyncPaths) -> CcsyncResult<Self> {
        let path = paths.config_file();

        if !paths.is_initialized() {
            return Err(CcsyncError::Config(format!(
                "Config file not found at: {}",
                path.display()
            )));
        }

        let settings: Settings = read_json_required(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate and save settings to disk
    pub fn save(&self, paths: &CcsyncPaths) -> CcsyncResult<()> {
        self.validate()?;
        write_json_atomic(paths.config_file(), self)
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> CcsyncResult<()> {
        if self.sync_destination.as_os_str().is_empty() {
            return Err(CcsyncError::Validation(
                "syncDestination must not be empty".into(),
            ));
        }

        for (i, project) in self.projects.iter().enumerate() {
            if project.name.trim().is_empty() {
                return Err(CcsyncError::Validation(format!(
                    "Project #{} has an empty name",
                    i + 1
                )));
            }
            if self.projects[..i].iter().any(|p| p.name == project.name) {
                return Err(CcsyncError::Duplicate {
                    entity_type: "Project",
                    identifier: project.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Look up a project by name
    pub fn find_project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Add a project, rejecting duplicate names
    pub fn add_project(&mut self, project: Project) -> CcsyncResult<()> {
        if self.find_project(&project.name).is_some() {
            return Err(CcsyncError::Duplicate {
                entity_type: "Project",
                identifier: project.name,
            });
        }
        self.projects.push(project);
        Ok(())
    }

    /// Remove a project by name, returning it
    pub fn remove_project(&mut self, name: &str) -> CcsyncResult<Project> {
        let pos = self
            .projects
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| CcsyncError::project_not_found(name))?;
        Ok(self.projects.remove(pos))
    }

    /// The configured post-sync hook, if any
    pub fn post_sync_hook(&self) -> Option<&str> {
        self.hooks.as_ref()?.post_sync.as_deref()
    }
}
