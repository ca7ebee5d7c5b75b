//! Hosting-provider port for repository metadata.

use std::future::Future;
use std::pin::Pin;

use crate::remote::{RemoteError, RemoteMetadata, RepoRef};

/// Boxed future type alias used by [`RemoteRepository`] to keep the trait dyn-compatible.
pub type RemoteFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RemoteMetadata, RemoteError>> + Send + 'a>>;

/// Fetches repository records from a hosting provider.
pub trait RemoteRepository: Send + Sync {
    /// Fetches the metadata snapshot of `repo`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] describing why the record is unavailable
    /// (not found, rate limited, unauthorized, network failure).
    fn fetch<'a>(&'a self, repo: &'a RepoRef) -> RemoteFuture<'a>;
}
