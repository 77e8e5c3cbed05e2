//! ccsync - versioned backup of Claude configuration files
//!
//! This library collects `claude.md` files and Claude settings from a set of
//! source projects into a single destination tree. When a destination file
//! is about to be overwritten with different content, the prior copy can be
//! kept as a versioned sibling and old versions pruned by a retention count.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings file, and project definitions
//! - `error`: Custom error types
//! - `storage`: Atomic JSON file helpers
//! - `discovery`: Finding the files a project backs up
//! - `versioning`: Version naming, catalog, backup writer, and pruning
//! - `sync`: Per-file sync orchestration and sync units
//! - `history`: JSON-backed history of runs
//! - `hooks`: Post-sync shell hook
//! - `display`: Terminal formatting for status and history
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use ccsync::config::{CcsyncPaths, Settings};
//! use ccsync::sync::sync_project;
//!
//! let paths = CcsyncPaths::new()?;
//! let settings = Settings::load(&paths)?;
//! for project in &settings.projects {
//!     let outcome = sync_project(project, &settings.sync_destination)?;
//!     println!("{}", outcome.summary());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod display;
pub mod error;
pub mod history;
pub mod hooks;
pub mod logging;
pub mod storage;
pub mod sync;
pub mod versioning;

pub use error::{CcsyncError, CcsyncResult};
