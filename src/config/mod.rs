//! Configuration module for ccsync
//!
//! This module provides configuration management including:
//! - Config and history path resolution, with environment overrides
//! - Persisted settings (projects, destination, retention, hooks)

pub mod paths;
pub mod settings;

pub use paths::{absolute, CcsyncPaths};
pub use settings::{BackupTypes, Hooks, Project, Settings};
