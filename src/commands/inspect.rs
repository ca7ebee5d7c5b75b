//! `docsmith inspect` command.

use std::path::Path;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::metadata::{aggregate, default_extractors};
use crate::scan::{render_tree, Scanner};

/// Execute the `inspect` command: print the tree and the detected metadata.
///
/// Nothing is sent to the network.
///
/// # Errors
///
/// Returns an error string if the config is invalid or the scan fails.
pub async fn run(ctx: &ServiceContext, path: &Path) -> Result<(), String> {
    let settings = Settings::load(path)?;
    let exclusions = settings.exclusion_set()?;
    let scan = Scanner::new(ctx.fs.as_ref(), &exclusions).scan(path).await?;
    let local = aggregate(ctx.fs.as_ref(), path, &default_extractors()).await;

    println!("{}", path.display());
    print!("{}", render_tree(&scan.tree));
    println!();
    let yaml = serde_yaml::to_string(&local)
        .map_err(|e| format!("failed to render metadata: {e}"))?;
    print!("{yaml}");
    Ok(())
}
