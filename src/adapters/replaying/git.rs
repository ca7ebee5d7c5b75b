//! Replaying adapter for the `GitRepo` port.

use std::path::Path;

use super::{next_output, replay_result, SharedReplayer};
use crate::ports::git::GitRepo;
use crate::ports::BoxError;

/// Serves recorded `origin` remote lookups.
pub struct ReplayingGitRepo {
    replayer: SharedReplayer,
}

impl ReplayingGitRepo {
    /// Creates the adapter over a shared replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn remote_url(&self, _dir: &Path) -> Result<Option<String>, BoxError> {
        replay_result(next_output(&self.replayer, "git", "remote_url"), "git::remote_url")
    }
}
