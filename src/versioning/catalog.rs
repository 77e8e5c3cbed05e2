//! Version catalog reader
//!
//! Lists the versioned backups that sit next to a destination file. Both
//! naming schemes are recognised regardless of the active strategy, since a
//! directory may hold history written before a strategy switch.

use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use super::{name_parts, VersionedFile};
use crate::error::{CcsyncError, CcsyncResult};

/// Which naming scheme a file name matched
enum Token<'a> {
    Timestamp(&'a str),
    Counter(&'a str),
}

/// List existing versions of `destination`, most recent first
///
/// Ties on timestamp are broken by file name, descending, so the order is
/// stable across runs. A missing directory has no versions; any other
/// listing failure is returned as an error.
pub fn list_versions(destination: &Path) -> CcsyncResult<Vec<VersionedFile>> {
    let (dir, stem, ext) = name_parts(destination)?;
    let prefix = format!("{}.", stem);

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(CcsyncError::Io(format!(
                "Failed to list {}: {}",
                dir.display(),
                e
            )))
        }
    };

    let mut versions = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| {
            CcsyncError::Io(format!("Failed to read entry in {}: {}", dir.display(), e))
        })?;

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };

        let Some(token) = match_token(file_name, &prefix, &ext) else {
            continue;
        };

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        let path = entry.path();
        match token {
            Token::Timestamp(raw) => {
                if let Some(timestamp) = parse_timestamp_token(raw) {
                    versions.push(VersionedFile {
                        version: raw.to_string(),
                        path,
                        timestamp,
                    });
                }
            }
            Token::Counter(raw) => {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .map_err(|e| {
                        CcsyncError::Io(format!("Failed to stat {}: {}", path.display(), e))
                    })?;
                versions.push(VersionedFile {
                    version: raw.to_string(),
                    path,
                    timestamp: DateTime::<Local>::from(modified),
                });
            }
        }
    }

    versions.sort_by(newest_first);
    Ok(versions)
}

fn newest_first(a: &VersionedFile, b: &VersionedFile) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| b.path.file_name().cmp(&a.path.file_name()))
}

/// Match `<stem>.<token><ext>` and classify the token
fn match_token<'a>(file_name: &'a str, prefix: &str, ext: &str) -> Option<Token<'a>> {
    let token = file_name.strip_prefix(prefix)?.strip_suffix(ext)?;

    if is_timestamp_token(token) {
        return Some(Token::Timestamp(token));
    }

    let counter = token.strip_prefix('v')?;
    if counter.len() == 3 && counter.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Token::Counter(counter));
    }

    None
}

/// `\d{8}_\d{6}`
fn is_timestamp_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 15
        && bytes[8] == b'_'
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[9..].iter().all(u8::is_ascii_digit)
}

/// Parse `YYYYMMDD_HHMMSS` as local wall-clock time
pub(crate) fn parse_timestamp_token(token: &str) -> Option<DateTime<Local>> {
    if !is_timestamp_token(token) {
        return None;
    }

    let year: i32 = token[0..4].parse().ok()?;
    let month: u32 = token[4..6].parse().ok()?;
    let day: u32 = token[6..8].parse().ok()?;
    let hour: u32 = token[9..11].parse().ok()?;
    let minute: u32 = token[11..13].parse().ok()?;
    let second: u32 = token[13..15].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    let naive = NaiveDateTime::new(date, time);

    // A token that falls in a DST gap is read as UTC rather than dropped
    Some(
        Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&naive)),
    )
}
