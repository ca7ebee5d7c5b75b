//! `docsmith local` command.

use std::path::Path;

use tracing::info;

use crate::cli::GenerateArgs;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::metadata::{aggregate, default_extractors};
use crate::scan::Scanner;

use super::discover_remote;
use super::readme::{produce, report, Sources};

/// Execute the `local` command on `path`, writing into `cwd`.
///
/// # Errors
///
/// Returns an error string if the scan fails, the directory yields no
/// usable data, or generation fails.
pub async fn run(
    ctx: &ServiceContext,
    path: &Path,
    args: &GenerateArgs,
    cwd: &Path,
) -> Result<(), String> {
    let settings = Settings::load(path)?;
    let exclusions = settings.exclusion_set()?;

    let scan = Scanner::new(ctx.fs.as_ref(), &exclusions).scan(path).await?;
    info!(files = scan.contents.len(), "scan complete");
    let local = aggregate(ctx.fs.as_ref(), path, &default_extractors()).await;
    let remote = discover_remote(ctx, path, &local).await;

    if scan.contents.is_empty() && local.records.is_empty() && remote.is_none() {
        return Err(format!("no usable project data found in {}", path.display()));
    }

    let sources = Sources { remote: remote.as_ref(), local: Some(&local), scan: Some(&scan) };
    let outcome = produce(ctx, &settings, args, sources, cwd).await?;
    report(&outcome);
    Ok(())
}
