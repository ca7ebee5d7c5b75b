//! Replaying adapter for the `Confirm` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::ports::confirm::Confirm;
use crate::ports::BoxError;

/// Answers confirmation questions from a cassette.
pub struct ReplayingConfirm {
    replayer: SharedReplayer,
}

impl ReplayingConfirm {
    /// Creates the adapter over a shared replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl Confirm for ReplayingConfirm {
    fn confirm(&self, _question: &str) -> Result<bool, BoxError> {
        replay_result(next_output(&self.replayer, "confirm", "confirm"), "confirm::confirm")
    }
}
