//! Custom error types for ccsync
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for ccsync operations
#[derive(Error, Debug)]
pub enum CcsyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A JSON file that must exist is malformed
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input and config values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors (config and history files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A directory that should be scanned does not exist
    #[error("Directory does not exist: {}", .0.display())]
    PathMissing(PathBuf),

    /// A path that should be a directory is something else
    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// File discovery failed while walking a tree
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Post-sync hook failed
    #[error("Post-sync hook failed: {0}")]
    Hook(String),

    /// One or more sync units finished with failures
    #[error("Sync completed with errors in {failed} of {total} unit(s)")]
    SyncFailed { failed: usize, total: usize },

    /// Another sync run holds the destination tree
    #[error("Destination is locked by another sync run: {}", .0.display())]
    Locked(PathBuf),
}

impl CcsyncError {
    /// Create a "not found" error for projects
    pub fn project_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Project",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PathMissing(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for CcsyncError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for ccsync operations
pub type CcsyncResult<T> = Result<T, CcsyncError>;
