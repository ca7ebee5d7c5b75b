//! Interactive confirmation port.

use super::BoxError;

/// Asks the user a yes/no question.
pub trait Confirm: Send + Sync {
    /// Returns `true` if the user accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer could be read (closed terminal, etc.).
    fn confirm(&self, question: &str) -> Result<bool, BoxError>;
}
