//! Prompt assembly for the narrative request.
//!
//! Sections always appear in the same order: repository metadata, local
//! project overview, file contents, instructions, then any extra
//! instructions supplied by the user. Absent inputs drop their section.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::badges::BadgeSet;
use crate::metadata::{AggregatedMetadata, PythonRecord};
use crate::remote::RemoteMetadata;
use crate::scan::{render_tree, Scan};

/// Everything the prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    /// Hosted repository record.
    pub remote: Option<&'a RemoteMetadata>,
    /// Local descriptor metadata.
    pub local: Option<&'a AggregatedMetadata>,
    /// Local tree and file contents.
    pub scan: Option<&'a Scan>,
    /// Badges that will be inserted under the title.
    pub badges: &'a BadgeSet,
    /// Free-form user instructions, appended last.
    pub extra_instructions: Option<&'a str>,
}

/// Title the narrative must open with.
///
/// The remote repository name, else the first manifest name, else the
/// analyzed directory's name, else `Project`.
#[must_use]
pub fn project_title(remote: Option<&RemoteMetadata>, local: Option<&AggregatedMetadata>) -> String {
    remote
        .map(|r| r.name.as_str())
        .filter(|n| !n.is_empty())
        .or_else(|| local.and_then(AggregatedMetadata::package_name))
        .or_else(|| local.and_then(|l| l.base_path.file_name()).and_then(|n| n.to_str()))
        .unwrap_or("Project")
        .to_string()
}

/// Renders the full prompt text.
#[must_use]
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let mut prompt = String::from(
        "You are writing the README.md for a software project. \
         Use only the information below.\n",
    );

    if let Some(remote) = input.remote {
        remote_section(remote, &mut prompt);
    }
    if input.local.is_some() || input.scan.is_some() {
        local_section(input.local, input.scan, &mut prompt);
    }
    if let Some(scan) = input.scan.filter(|s| !s.contents.is_empty()) {
        prompt.push_str("\n## File contents\n");
        for (path, contents) in &scan.contents {
            file_block(path, contents, &mut prompt);
        }
    }

    let title = project_title(input.remote, input.local);
    instructions(&title, input.badges.len(), &mut prompt);

    if let Some(extra) = input.extra_instructions.map(str::trim).filter(|e| !e.is_empty()) {
        let _ = write!(prompt, "\n## Additional instructions\n\n{extra}\n");
    }
    prompt
}

fn remote_section(remote: &RemoteMetadata, out: &mut String) {
    out.push_str("\n## Repository metadata\n\n");
    let mut field = |label: &str, value: &str| {
        if !value.is_empty() {
            let _ = writeln!(out, "- {label}: {value}");
        }
    };
    field("Name", &remote.name);
    field("Full name", &remote.full_name);
    field("Description", remote.description.as_deref().unwrap_or_default());
    field("Stars", &remote.stars.to_string());
    field("Forks", &remote.forks.to_string());
    field("Open issues", &remote.open_issues.to_string());
    field("License", remote.license_label().unwrap_or_default());
    field("Primary language", remote.language.as_deref().unwrap_or_default());
    field("Topics", &remote.topics.join(", "));
    field("Homepage", remote.homepage.as_deref().unwrap_or_default());
    field("URL", &remote.html_url);
    field("Owner", &remote.owner.login);
    field("Created", &date(remote.created_at));
    field("Last updated", &date(remote.updated_at));
    field("Last push", &date(remote.pushed_at));
    if remote.archived {
        field("Status", "archived");
    }
}

fn date(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map(|t| t.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn local_section(local: Option<&AggregatedMetadata>, scan: Option<&Scan>, out: &mut String) {
    out.push_str("\n## Local project\n");
    if let Some(scan) = scan.filter(|s| !s.tree.is_empty()) {
        let _ = write!(out, "\nFile tree:\n\n```text\n{}```\n", render_tree(&scan.tree));
    }
    let Some(local) = local else { return };
    if !local.summary_lines.is_empty() {
        out.push_str("\nDetected metadata:\n\n");
        for line in &local.summary_lines {
            let _ = writeln!(out, "- {line}");
        }
    }
    let description = local
        .node()
        .and_then(|n| n.description.as_deref())
        .or_else(|| local.rust().and_then(|r| r.description.as_deref()))
        .or_else(|| local.python().and_then(|p| p.setup.as_ref()).and_then(|s| s.description.as_deref()));
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\nManifest description: {description}");
    }
    if let Some(requirements) = local.python().and_then(|p: &PythonRecord| p.requirements.as_ref()) {
        if !requirements.is_empty() {
            let _ = writeln!(out, "\nPython requirements: {}", requirements.join(", "));
        }
    }
}

fn file_block(path: &str, contents: &str, out: &mut String) {
    let hint = Path::new(path).extension().and_then(|e| e.to_str()).unwrap_or_default();
    let fence = "`".repeat(longest_backtick_run(contents).max(2) + 1);
    let _ = write!(out, "\n### {path}\n\n{fence}{hint}\n{contents}");
    if !contents.ends_with('\n') {
        out.push('\n');
    }
    let _ = writeln!(out, "{fence}");
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn instructions(title: &str, badge_count: usize, out: &mut String) {
    let _ = write!(
        out,
        "\n## Instructions\n\n\
         Write a complete README.md in GitHub-flavored Markdown.\n\n\
         - The first line must be exactly: # {title}\n\
         - Do not include any badge markup or shields.io images. \
         {badge_count} badges will be inserted automatically below the title.\n\
         - After the title, include these sections in order: a short overview, \
         Features, Installation, Usage, Configuration (only when the project has \
         configuration), Contributing, License.\n\
         - Base every statement on the information above. Do not invent commands, \
         options, dependencies or URLs.\n\
         - Show commands in fenced code blocks with a language hint.\n\
         - Output only the README content, without surrounding code fences or commentary.\n"
    );
}
