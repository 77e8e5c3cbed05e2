//! Version namer
//!
//! Pure path computation: inserts a version token between a destination's
//! stem and its extension.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::{name_parts, VersioningStrategy};
use crate::error::{CcsyncError, CcsyncResult};

/// Largest counter the fixed-width `vNNN` token can express
pub const MAX_INCREMENTAL_VERSION: u32 = 999;

/// Compute the path the current destination will be renamed to
///
/// `next_counter` is only used by the incremental strategy and defaults to 1.
/// Timestamp names have one-second resolution; two renames within the same
/// second produce the same name.
pub fn next_version_name(
    destination: &Path,
    strategy: VersioningStrategy,
    next_counter: Option<u32>,
) -> CcsyncResult<PathBuf> {
    match strategy {
        VersioningStrategy::Timestamp => version_name_at(destination, Local::now()),
        VersioningStrategy::Incremental => {
            let counter = next_counter.unwrap_or(1);
            if counter == 0 || counter > MAX_INCREMENTAL_VERSION {
                return Err(CcsyncError::Validation(format!(
                    "Incremental version limit reached for {} (counter {} outside 1..={})",
                    destination.display(),
                    counter,
                    MAX_INCREMENTAL_VERSION
                )));
            }
            let (dir, stem, ext) = name_parts(destination)?;
            Ok(dir.join(format!("{}.v{:03}{}", stem, counter, ext)))
        }
        VersioningStrategy::None => Err(CcsyncError::Validation(
            "Strategy 'none' does not produce version names".into(),
        )),
    }
}

/// Timestamp version name for a given instant
pub fn version_name_at(destination: &Path, at: DateTime<Local>) -> CcsyncResult<PathBuf> {
    let (dir, stem, ext) = name_parts(destination)?;
    Ok(dir.join(format!("{}.{}{}", stem, at.format("%Y%m%d_%H%M%S"), ext)))
}
