//! Command dispatch and handlers.

pub mod badges;
pub mod inspect;
pub mod local;
pub mod readme;
pub mod remote;

use std::env;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::metadata::AggregatedMetadata;
use crate::remote::{RemoteMetadata, RepoRef};

/// Dispatch a parsed command to its handler on a single-threaded runtime.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let cwd = env::current_dir().map_err(|e| format!("cannot determine working directory: {e}"))?;
    let ctx = ServiceContext::live();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime.block_on(dispatch_with_context(command, &ctx, &cwd))
}

/// Dispatch a command with the given service context.
///
/// `cwd` is where `README.md` is written, the base of badge file links, and
/// where `remote` looks for its config file.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    cwd: &Path,
) -> Result<(), String> {
    match command {
        Command::Remote { url, generate } => remote::run(ctx, url, generate, cwd).await,
        Command::Local { path, generate } => {
            local::run(ctx, &cwd.join(path), generate, cwd).await
        }
        Command::Badges { path, remote, style } => {
            badges::run(ctx, &cwd.join(path), remote.as_deref(), *style, cwd).await
        }
        Command::Inspect { path } => inspect::run(ctx, &cwd.join(path)).await,
    }
}

/// Looks up the hosted record of a local project.
///
/// Tries the `origin` remote first, then the `repository` field of
/// `package.json`. The reference is fetched exactly as parsed. Every
/// failure is logged and yields `None`.
pub(crate) async fn discover_remote(
    ctx: &ServiceContext,
    dir: &Path,
    local: &AggregatedMetadata,
) -> Option<RemoteMetadata> {
    let origin = match ctx.git.remote_url(dir) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "could not read git remote; continuing with local data only");
            None
        }
    };
    let candidate = origin.or_else(|| local.node().and_then(|n| n.repository.clone()))?;

    let repo = match RepoRef::parse(&candidate) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(url = %candidate, error = %e, "remote is not a GitHub repository");
            return None;
        }
    };
    info!(%repo, "fetching remote metadata");
    match ctx.remote.fetch(&repo).await {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            warn!(%repo, error = %e, "remote metadata unavailable; continuing with local data only");
            None
        }
    }
}
