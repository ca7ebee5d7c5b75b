//! Git repository port for version-control queries.

use std::path::Path;

use super::BoxError;

/// Provides read access to a local git checkout.
pub trait GitRepo: Send + Sync {
    /// Returns the URL of the `origin` remote of the checkout at `dir`.
    ///
    /// Returns `Ok(None)` when `dir` is not a git checkout or has no
    /// `origin` remote.
    ///
    /// # Errors
    ///
    /// Returns an error if git itself cannot be invoked.
    fn remote_url(&self, dir: &Path) -> Result<Option<String>, BoxError>;
}
