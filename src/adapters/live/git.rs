//! Live git adapter using the `git` CLI.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::ports::git::GitRepo;
use crate::ports::BoxError;

/// Live git adapter that shells out to the `git` CLI.
pub struct LiveGitRepo;

impl GitRepo for LiveGitRepo {
    fn remote_url(&self, dir: &Path) -> Result<Option<String>, BoxError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["remote", "get-url", "origin"])
            .output()
            .map_err(|e| format!("failed to run git: {e}"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(dir = %dir.display(), stderr = %stderr.trim(), "no origin remote");
            return Ok(None);
        }
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(url).filter(|u| !u.is_empty()))
    }
}
