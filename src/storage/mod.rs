//! Storage layer for ccsync
//!
//! JSON file storage with atomic writes and automatic directory creation,
//! shared by the settings file and the history log.

pub mod file_io;

pub use file_io::{read_json, read_json_required, write_json_atomic};
