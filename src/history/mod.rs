//! Sync history for ccsync
//!
//! Every sync, init, project change, and global backup is recorded in an
//! append-only history file so `ccsync history` can show what happened.
//!
//! # Architecture
//!
//! - `HistoryEntry`: one recorded action with its outcome
//! - `HistoryLog`: reads and rewrites the JSON array stored in `history.json`
//!
//! # Example
//!
//! ```rust,ignore
//! use ccsync::history::{HistoryAction, HistoryEntry, HistoryLog};
//!
//! let log = HistoryLog::new(paths.history_file());
//! log.append(HistoryEntry::new(HistoryAction::Sync, true).with_project("web"))?;
//! let recent = log.entries(Some("web"), Some(10))?;
//! ```

mod entry;
mod log;

pub use entry::{HistoryAction, HistoryEntry};
pub use log::HistoryLog;
