//! The shared tail of `remote` and `local`: badges, prompt, narrative, output.

use std::path::Path;

use tracing::info;

use crate::badges::synthesize;
use crate::cli::GenerateArgs;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::document::{assemble, write_document, OutputMode, WriteOutcome};
use crate::generation::generate_narrative;
use crate::metadata::AggregatedMetadata;
use crate::prompt::{build_prompt, PromptInput};
use crate::remote::RemoteMetadata;
use crate::scan::Scan;

/// Inputs gathered by a command before generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sources<'a> {
    /// Hosted repository record.
    pub remote: Option<&'a RemoteMetadata>,
    /// Local descriptor metadata.
    pub local: Option<&'a AggregatedMetadata>,
    /// Local tree and file contents.
    pub scan: Option<&'a Scan>,
}

/// Generates the README from `sources` and writes or previews it in `out_dir`.
///
/// # Errors
///
/// Returns an error string if generation or output fails.
pub async fn produce(
    ctx: &ServiceContext,
    settings: &Settings,
    args: &GenerateArgs,
    sources: Sources<'_>,
    out_dir: &Path,
) -> Result<WriteOutcome, String> {
    let badges = synthesize(sources.remote, sources.local, &settings.badge_options(args.style, out_dir));
    info!(badges = badges.len(), style = badges.style.as_str(), "badges synthesized");

    let prompt = build_prompt(&PromptInput {
        remote: sources.remote,
        local: sources.local,
        scan: sources.scan,
        badges: &badges,
        extra_instructions: args.instructions.as_deref(),
    });
    let model = args.model.as_deref().unwrap_or(&settings.model);
    info!(model, prompt_chars = prompt.len(), "requesting narrative");
    let narrative = generate_narrative(ctx.llm.as_ref(), model, settings.max_tokens, prompt)
        .await
        .map_err(|e| e.to_string())?;

    let document = assemble(&narrative, &badges);
    let mode = if args.dry_run { OutputMode::Preview } else { OutputMode::Persist };
    write_document(ctx, &document, mode, out_dir, args.force).await
}

/// Prints a one-line summary of a write.
pub fn report(outcome: &WriteOutcome) {
    match outcome {
        WriteOutcome::Previewed => {}
        WriteOutcome::Written(path) => println!("Wrote {}", path.display()),
        WriteOutcome::Declined => println!("Kept the existing README.md"),
    }
}
