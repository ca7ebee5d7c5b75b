//! Live confirmation adapter backed by a terminal prompt.

use dialoguer::Confirm as Prompt;

use crate::ports::confirm::Confirm;
use crate::ports::BoxError;

/// Asks on the controlling terminal. The default answer is "no".
pub struct LiveConfirm;

impl Confirm for LiveConfirm {
    fn confirm(&self, question: &str) -> Result<bool, BoxError> {
        Ok(Prompt::new().with_prompt(question).default(false).interact()?)
    }
}
