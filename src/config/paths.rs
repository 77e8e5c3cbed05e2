//! Path management for ccsync
//!
//! Resolves where the config and history files live, and where Claude keeps
//! its global project data.
//!
//! ## Path Resolution Order
//!
//! 1. `CCSYNC_CONFIG_PATH` / `CCSYNC_HISTORY_PATH` environment variables (if set)
//! 2. `$XDG_CONFIG_HOME/ccsync/...` when `XDG_CONFIG_HOME` is set
//! 3. `~/.config/ccsync/...`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::CcsyncError;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "CCSYNC_CONFIG_PATH";

/// Environment variable overriding the history file location
pub const HISTORY_PATH_ENV: &str = "CCSYNC_HISTORY_PATH";

/// Environment variable supplying a default sync destination for `init`
pub const SYNC_DESTINATION_ENV: &str = "CCSYNC_SYNC_DESTINATION";

/// Manages all paths used by ccsync
#[derive(Debug, Clone)]
pub struct CcsyncPaths {
    config_file: PathBuf,
    history_file: PathBuf,
    home_dir: PathBuf,
}

impl CcsyncPaths {
    /// Resolve paths from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CcsyncError> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| CcsyncError::Config("Could not determine home directory".into()))?;
        let home_dir = base_dirs.home_dir().to_path_buf();

        let config_base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home_dir.join(".config"))
            .join("ccsync");

        let config_file = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| config_base.join("settings.json"));

        let history_file = std::env::var_os(HISTORY_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| config_base.join("history.json"));

        Ok(Self {
            config_file,
            history_file,
            home_dir,
        })
    }

    /// Build paths explicitly (useful for testing)
    pub fn with_paths(config_file: PathBuf, history_file: PathBuf, home_dir: PathBuf) -> Self {
        Self {
            config_file,
            history_file,
            home_dir,
        }
    }

    /// Path to settings.json
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Path to history.json
    pub fn history_file(&self) -> &Path {
        &self.history_file
    }

    /// Claude's home directory (~/.claude)
    pub fn claude_home(&self) -> PathBuf {
        self.home_dir.join(".claude")
    }

    /// Claude's global per-project data (~/.claude/projects)
    pub fn claude_projects(&self) -> PathBuf {
        self.claude_home().join("projects")
    }

    /// Check if ccsync has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }
}

/// Make `path` absolute against the working directory
///
/// Lexical only: symlinks and `..` are left as they are.
pub fn absolute(path: &Path) -> Result<PathBuf, CcsyncError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CcsyncPaths::with_paths(
            temp_dir.path().join("settings.json"),
            temp_dir.path().join("history.json"),
            temp_dir.path().join("home"),
        );

        assert_eq!(paths.config_file(), temp_dir.path().join("settings.json"));
        assert_eq!(paths.history_file(), temp_dir.path().join("history.json"));
        assert_eq!(
            paths.claude_projects(),
            temp_dir.path().join("home").join(".claude").join("projects")
        );
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_absolute() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute(Path::new("rel/dir")).unwrap(), cwd.join("rel/dir"));
        assert_eq!(absolute(Path::new("/abs")).unwrap(), PathBuf::from("/abs"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("custom-settings.json");

        std::env::set_var(CONFIG_PATH_ENV, &config);
        let paths = CcsyncPaths::new().unwrap();
        std::env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(paths.config_file(), config);
    }
}
