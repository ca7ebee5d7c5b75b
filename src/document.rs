//! Final README assembly and output.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::badges::BadgeSet;
use crate::context::ServiceContext;

/// Name of the generated file.
pub const OUTPUT_FILE: &str = "README.md";

/// Where the assembled document goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Print to stdout and touch nothing on disk.
    Preview,
    /// Write [`OUTPUT_FILE`].
    Persist,
}

/// What [`write_document`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Printed to stdout.
    Previewed,
    /// Written to this path.
    Written(PathBuf),
    /// An existing file was kept because the user declined to overwrite it.
    Declined,
}

/// Inserts the badge lines after the narrative's first line.
///
/// Layout: title, blank line, important badges, blank line, other badges,
/// blank line, rest of the narrative. A badge group with no badges adds no
/// line. Leading blank lines of the narrative are dropped.
#[must_use]
pub fn assemble(narrative: &str, badges: &BadgeSet) -> String {
    let narrative = narrative.trim_start_matches(['\n', '\r']);
    let (title, body) = narrative.split_once('\n').unwrap_or((narrative, ""));

    let mut blocks = vec![title.trim_end().to_string()];
    blocks.extend([badges.important_line(), badges.other_line()].into_iter().filter(|l| !l.is_empty()));
    let body = body.trim_start_matches(['\n', '\r']);
    if !body.is_empty() {
        blocks.push(body.to_string());
    }

    let mut document = blocks.join("\n\n");
    if !document.ends_with('\n') {
        document.push('\n');
    }
    document
}

/// Outputs `document` according to `mode`.
///
/// In [`OutputMode::Persist`], an existing `README.md` in `dir` is only
/// replaced when `force` is set or the user confirms.
///
/// # Errors
///
/// Returns an error if the confirmation cannot be read or the file cannot
/// be written.
pub async fn write_document(
    ctx: &ServiceContext,
    document: &str,
    mode: OutputMode,
    dir: &Path,
    force: bool,
) -> Result<WriteOutcome, String> {
    if mode == OutputMode::Preview {
        print!("{document}");
        return Ok(WriteOutcome::Previewed);
    }

    let path = dir.join(OUTPUT_FILE);
    if !force && ctx.fs.exists(&path) {
        let question = format!("{} already exists. Overwrite it?", path.display());
        let accepted = ctx.confirm.confirm(&question).map_err(|e| {
            format!("could not confirm overwriting {}: {e} (pass --force to overwrite)", path.display())
        })?;
        if !accepted {
            info!(path = %path.display(), "kept existing file");
            return Ok(WriteOutcome::Declined);
        }
    }

    ctx.fs
        .write(&path, document)
        .await
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    info!(path = %path.display(), bytes = document.len(), "README written");
    Ok(WriteOutcome::Written(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::{Badge, BadgeGroup};
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;
    use tempfile::TempDir;

    fn badge(label: &str, group: BadgeGroup) -> Badge {
        Badge {
            label: label.into(),
            image_url: format!("https://img.shields.io/badge/{label}-x-blue"),
            link_url: "https://example.com".into(),
            group,
        }
    }

    fn badges() -> BadgeSet {
        BadgeSet {
            important: vec![badge("a", BadgeGroup::Important), badge("b", BadgeGroup::Important)],
            other: vec![badge("c", BadgeGroup::Other)],
            ..BadgeSet::default()
        }
    }

    fn confirming(answer: bool) -> ServiceContext {
        ServiceContext::from_cassette(&Cassette::new(
            "confirm",
            vec![Interaction::new("confirm", "confirm", json!({}), json!(answer))],
        ))
    }

    #[test]
    fn badge_lines_follow_the_title() {
        let set = badges();
        let document = assemble("# Widget\n\nIntro text.\n\n## Usage\n", &set);
        let expected = format!(
            "# Widget\n\n{}\n\n{}\n\nIntro text.\n\n## Usage\n",
            set.important_line(),
            set.other_line()
        );
        assert_eq!(document, expected);
    }

    #[test]
    fn empty_groups_add_no_lines() {
        let set = BadgeSet { other: vec![], ..badges() };
        let document = assemble("# Widget\nBody", &set);
        assert_eq!(document, format!("# Widget\n\n{}\n\nBody\n", set.important_line()));
        assert_eq!(assemble("# Widget\nBody", &BadgeSet::default()), "# Widget\n\nBody\n");
    }

    #[test]
    fn single_line_narrative_keeps_title() {
        assert_eq!(assemble("\n# Only", &BadgeSet::default()), "# Only\n");
    }

    #[tokio::test]
    async fn declined_overwrite_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        std::fs::write(&path, "original\n").unwrap();

        let ctx = confirming(false);
        let outcome =
            write_document(&ctx, "# New\n", OutputMode::Persist, dir.path(), false).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Declined);
        assert_eq!(std::fs::read(&path).unwrap(), b"original\n");
    }

    #[tokio::test]
    async fn accepted_overwrite_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        std::fs::write(&path, "original\n").unwrap();

        let ctx = confirming(true);
        let outcome =
            write_document(&ctx, "# New\n", OutputMode::Persist, dir.path(), false).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Written(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# New\n");
    }

    #[tokio::test]
    async fn force_and_fresh_directories_skip_the_question() {
        // An empty cassette panics if the confirm port is consulted.
        let ctx = ServiceContext::from_cassette(&Cassette::new("none", vec![]));
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OUTPUT_FILE);

        write_document(&ctx, "# One\n", OutputMode::Persist, dir.path(), false).await.unwrap();
        write_document(&ctx, "# Two\n", OutputMode::Persist, dir.path(), true).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Two\n");
    }

    #[tokio::test]
    async fn preview_writes_nothing() {
        let ctx = ServiceContext::from_cassette(&Cassette::new("none", vec![]));
        let dir = TempDir::new().unwrap();
        let outcome =
            write_document(&ctx, "# Doc\n", OutputMode::Preview, dir.path(), false).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Previewed);
        assert!(!dir.path().join(OUTPUT_FILE).exists());
    }
}
