//! Display formatting for terminal output
//!
//! Formats projects and history for the status and history commands.

pub mod history;
pub mod project;

pub use history::format_history;
pub use project::{format_project_list, format_project_status, ProjectStatus};
