//! `docsmith remote` command.

use std::path::Path;

use crate::cli::GenerateArgs;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::remote::RepoRef;

use super::readme::{produce, report, Sources};

/// Execute the `remote` command.
///
/// Remote metadata is the only source here, so a failed fetch is fatal.
///
/// # Errors
///
/// Returns an error string if the URL is invalid, the fetch fails or
/// generation fails.
pub async fn run(
    ctx: &ServiceContext,
    url: &str,
    args: &GenerateArgs,
    cwd: &Path,
) -> Result<(), String> {
    let settings = Settings::load(cwd)?;
    let repo = RepoRef::parse(url).map_err(|e| e.to_string())?;
    let remote = ctx.remote.fetch(&repo).await.map_err(|e| e.to_string())?;

    let sources = Sources { remote: Some(&remote), ..Sources::default() };
    let outcome = produce(ctx, &settings, args, sources, cwd).await?;
    report(&outcome);
    Ok(())
}
