//! File discovery
//!
//! Walks a project tree and returns the absolute, sorted paths of files
//! that should be backed up. `.gitignore` rules are honoured unless a
//! project opts into git-ignored files, and build/dependency directories
//! are always skipped.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

use crate::config::{absolute, BackupTypes};
use crate::error::{CcsyncError, CcsyncResult};

/// Directories never descended into
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
    ".cache",
];

/// OS clutter skipped by the global backup
const GLOBAL_EXCLUDED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

const CLAUDE_MD_PATTERNS: &[&str] = &["claude.md", "CLAUDE.md", "**/claude.md", "**/CLAUDE.md"];

const SETTINGS_LOCAL_PATTERNS: &[&str] = &[
    ".claude/settings.local.json",
    "**/.claude/settings.local.json",
];

/// Filters applied while scanning a project
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub include_git_ignored: bool,
    pub backup_types: BackupTypes,
}

/// Scan `root` for backup candidates
///
/// # Errors
///
/// `PathMissing` if `root` does not exist, `NotADirectory` if it is not a
/// directory, `Discovery` if the walk itself fails.
pub fn discover(root: &Path, options: &ScanOptions) -> CcsyncResult<Vec<PathBuf>> {
    ensure_directory(root)?;

    let patterns = compile_patterns(&options.backup_types)?;
    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let respect_gitignore = !options.include_git_ignored;
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .parents(false)
        .git_global(false)
        .git_ignore(respect_gitignore)
        .git_exclude(respect_gitignore)
        .require_git(false)
        .follow_links(false)
        .filter_entry(|entry| !is_excluded_dir(entry))
        .build();

    let match_options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| CcsyncError::Discovery(e.to_string()))?;
        if !entry.file_type().map_or(false, |t| t.is_file()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");

        if patterns
            .iter()
            .any(|p| p.matches_with(&relative, match_options))
        {
            files.push(absolute(entry.path())?);
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered files");
    Ok(files)
}

/// Every regular, non-hidden file under Claude's global projects directory
///
/// Dotfiles and dot-directories are skipped, as is OS clutter such as
/// `Thumbs.db`.
pub fn discover_global(projects_dir: &Path) -> CcsyncResult<Vec<PathBuf>> {
    ensure_directory(projects_dir)?;

    let walker = WalkBuilder::new(projects_dir)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| CcsyncError::Discovery(e.to_string()))?;
        if !entry.file_type().map_or(false, |t| t.is_file()) {
            continue;
        }
        let excluded = entry
            .file_name()
            .to_str()
            .map_or(false, |n| GLOBAL_EXCLUDED_FILES.contains(&n));
        if !excluded {
            files.push(absolute(entry.path())?);
        }
    }

    files.sort();
    Ok(files)
}

fn ensure_directory(root: &Path) -> CcsyncResult<()> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CcsyncError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CcsyncError::PathMissing(root.to_path_buf()))
        }
        Err(e) => Err(CcsyncError::Io(format!(
            "Failed to stat {}: {}",
            root.display(),
            e
        ))),
    }
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    // depth 0 is the root itself, which may legitimately be named "build"
    entry.depth() > 0
        && entry.file_type().map_or(false, |t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .map_or(false, |n| EXCLUDED_DIRS.contains(&n))
}

fn compile_patterns(types: &BackupTypes) -> CcsyncResult<Vec<Pattern>> {
    let mut raw: Vec<&str> = Vec::new();
    if types.claude_md {
        raw.extend_from_slice(CLAUDE_MD_PATTERNS);
    }
    if types.settings_local {
        raw.extend_from_slice(SETTINGS_LOCAL_PATTERNS);
    }

    raw.into_iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| CcsyncError::Discovery(format!("Bad pattern '{}': {}", p, e)))
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_finds_claude_md_at_any_depth() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "claude.md", "# Root");
        write(temp.path(), "subdir/claude.md", "# Sub");
        write(temp.path(), "deep/nested/CLAUDE.md", "# Deep");
        write(temp.path(), "README.md", "# Readme");
        write(temp.path(), "Claude.md", "# wrong case");

        let files = discover(temp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(
            relative(temp.path(), &files),
            vec!["claude.md", "deep/nested/CLAUDE.md", "subdir/claude.md"]
        );
        assert!(files.iter().all(|f| f.is_absolute()));
    }

    #[test]
    fn test_skips_excluded_directories() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "claude.md", "# Root");
        write(temp.path(), "node_modules/pkg/claude.md", "# Dep");
        write(temp.path(), "dist/claude.md", "# Dist");
        write(temp.path(), ".git/claude.md", "# Git");

        let files = discover(temp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(relative(temp.path(), &files), vec!["claude.md"]);
    }

    #[test]
    fn test_respects_gitignore() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".gitignore", "ignored/\n");
        write(temp.path(), "claude.md", "# Root");
        write(temp.path(), "ignored/claude.md", "# Ignored");

        let files = discover(temp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(relative(temp.path(), &files), vec!["claude.md"]);

        let options = ScanOptions {
            include_git_ignored: true,
            ..ScanOptions::default()
        };
        let files = discover(temp.path(), &options).unwrap();
        assert_eq!(
            relative(temp.path(), &files),
            vec!["claude.md", "ignored/claude.md"]
        );
    }

    #[test]
    fn test_settings_local_type() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "claude.md", "# Root");
        write(temp.path(), ".claude/settings.local.json", "{}");
        write(temp.path(), "pkg/.claude/settings.local.json", "{}");
        write(temp.path(), ".claude/settings.json", "{}");

        let options = ScanOptions {
            include_git_ignored: false,
            backup_types: BackupTypes {
                claude_md: false,
                claude_projects: false,
                settings_local: true,
            },
        };
        let files = discover(temp.path(), &options).unwrap();
        assert_eq!(
            relative(temp.path(), &files),
            vec![".claude/settings.local.json", "pkg/.claude/settings.local.json"]
        );
    }

    #[test]
    fn test_no_enabled_types() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "claude.md", "# Root");

        let options = ScanOptions {
            include_git_ignored: false,
            backup_types: BackupTypes {
                claude_md: false,
                claude_projects: false,
                settings_local: false,
            },
        };
        assert!(discover(temp.path(), &options).unwrap().is_empty());
    }

    #[test]
    fn test_missing_and_non_directory_roots() {
        let temp = TempDir::new().unwrap();

        let err = discover(&temp.path().join("nope"), &ScanOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Directory does not exist"));

        write(temp.path(), "file.txt", "x");
        let err = discover(&temp.path().join("file.txt"), &ScanOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Path is not a directory"));
    }

    #[test]
    fn test_discover_global() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "proj-a/session.jsonl", "{}");
        write(temp.path(), "proj-b/.hidden", "x");
        write(temp.path(), "proj-b/.DS_Store", "x");
        write(temp.path(), "proj-b/.cache/blob", "x");
        write(temp.path(), "proj-b/notes.jsonl", "{}");
        write(temp.path(), "Thumbs.db", "x");

        let files = discover_global(temp.path()).unwrap();
        assert_eq!(
            relative(temp.path(), &files),
            vec!["proj-a/session.jsonl", "proj-b/notes.jsonl"]
        );

        assert!(discover_global(&temp.path().join("missing")).is_err());
    }
}
