//! Sync engine for ccsync
//!
//! # Architecture
//!
//! - `engine`: per-file decisions (skip unchanged, version, copy, prune)
//!   and the aggregate `SyncOutcome`
//! - `lock`: advisory single-writer lock on a destination tree
//! - `unit`: discovery + lock + engine for one project or the global backup
//!
//! Data flows one way: discovery -> `sync_files` -> versioning writer ->
//! pruner. Nothing here reads the environment or the config file; callers
//! pass resolved paths and policy values in.

pub mod engine;
pub mod lock;
pub mod unit;

pub use engine::{destination_for, files_identical, sync_files, SyncOutcome, SyncPolicy};
pub use lock::DestinationLock;
pub use unit::{sync_global, sync_project};
