//! User hooks run around a sync
//!
//! The post-sync hook is a shell command line taken verbatim from
//! settings.json and run through the platform shell.

use duct::cmd;
use tracing::debug;

use crate::error::{CcsyncError, CcsyncResult};

/// Run `command` through the shell, failing on a non-zero exit
pub fn run_post_sync(command: &str) -> CcsyncResult<()> {
    debug!(command, "running post-sync hook");

    #[cfg(windows)]
    let expression = cmd!("cmd", "/C", command);
    #[cfg(not(windows))]
    let expression = cmd!("sh", "-c", command);

    expression
        .stdout_null()
        .stderr_capture()
        .run()
        .map(|_| ())
        .map_err(|e| CcsyncError::Hook(e.to_string()))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hook_runs() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("ran");
        run_post_sync(&format!("touch '{}'", marker.display())).unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn test_hook_failure() {
        let err = run_post_sync("exit 3").unwrap_err();
        assert!(matches!(err, CcsyncError::Hook(_)));
    }
}
