//! `docsmith badges` command.

use std::path::Path;

use crate::badges::{synthesize, BadgeStyle};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::metadata::{aggregate, default_extractors};
use crate::remote::RepoRef;

use super::discover_remote;

/// Execute the `badges` command: print the important and other badge lines.
///
/// An explicit `--remote` must resolve; the `origin` fallback may not.
/// Local file links are relative to `out_dir`, where the README lives.
///
/// # Errors
///
/// Returns an error string if the config or the explicit remote is invalid.
pub async fn run(
    ctx: &ServiceContext,
    path: &Path,
    remote_url: Option<&str>,
    style: Option<BadgeStyle>,
    out_dir: &Path,
) -> Result<(), String> {
    let settings = Settings::load(path)?;
    let local = aggregate(ctx.fs.as_ref(), path, &default_extractors()).await;
    let remote = match remote_url {
        Some(url) => {
            let repo = RepoRef::parse(url).map_err(|e| e.to_string())?;
            Some(ctx.remote.fetch(&repo).await.map_err(|e| e.to_string())?)
        }
        None => discover_remote(ctx, path, &local).await,
    };

    let badges = synthesize(remote.as_ref(), Some(&local), &settings.badge_options(style, out_dir));
    for line in [badges.important_line(), badges.other_line()] {
        if !line.is_empty() {
            println!("{line}");
        }
    }
    Ok(())
}
