//! Shields.io badge synthesis.
//!
//! Badges come in two groups. The important group (stars, license, version)
//! is placed on its own line right after the title; the other group
//! (forks, issues, last commit, language, container) follows on a second
//! line. A badge whose inputs are missing is left out rather than rendered
//! with an empty value.

pub mod style;

use std::path::{Component, Path};

use serde::Serialize;

pub use style::{resolve_style, BadgeOptions, BadgeStyle};

use crate::metadata::{AggregatedMetadata, DockerRecord, Ecosystem, NodeRecord};
use crate::remote::RemoteMetadata;

const SHIELDS_URL: &str = "https://img.shields.io";
const GITHUB_URL: &str = "https://github.com";

/// Which line a badge belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeGroup {
    /// First line under the title.
    Important,
    /// Second line.
    Other,
}

/// A single linked badge image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// Alt text.
    pub label: String,
    /// Shields image URL.
    pub image_url: String,
    /// Link target.
    pub link_url: String,
    /// Line the badge is placed on.
    pub group: BadgeGroup,
}

impl Badge {
    fn new(label: &str, image_url: String, link_url: String, group: BadgeGroup) -> Self {
        Self { label: label.to_string(), image_url, link_url, group }
    }

    /// Markdown for a linked image: `[![label](image)](link)`.
    #[must_use]
    pub fn markup(&self) -> String {
        format!("[![{}]({})]({})", self.label, self.image_url, self.link_url)
    }
}

/// The badges of one document, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BadgeSet {
    /// Style every badge was rendered with.
    pub style: BadgeStyle,
    /// Stars, license, version.
    pub important: Vec<Badge>,
    /// Forks, issues, last commit, language, container.
    pub other: Vec<Badge>,
}

impl BadgeSet {
    /// Space-separated markup of the important group; empty when the group is.
    #[must_use]
    pub fn important_line(&self) -> String {
        line(&self.important)
    }

    /// Space-separated markup of the other group; empty when the group is.
    #[must_use]
    pub fn other_line(&self) -> String {
        line(&self.other)
    }

    /// Total number of badges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.important.len() + self.other.len()
    }

    /// No badge in either group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn line(badges: &[Badge]) -> String {
    badges.iter().map(Badge::markup).collect::<Vec<_>>().join(" ")
}

/// Builds the badge set for a project from whatever metadata is available.
///
/// Pure: the same inputs always give the same badges in the same order.
#[must_use]
pub fn synthesize(
    remote: Option<&RemoteMetadata>,
    local: Option<&AggregatedMetadata>,
    options: &BadgeOptions,
) -> BadgeSet {
    let style = resolve_style(remote, local, options);
    let repo = remote.and_then(repository_path);

    let important = [
        repo.as_deref().map(|r| stars(r, style)),
        repo.as_deref().zip(remote.and_then(RemoteMetadata::license_label)).map(|(r, l)| license(r, l, style)),
        local.and_then(AggregatedMetadata::node).and_then(|n| version(n, style)),
    ];

    let language_badge = match remote {
        Some(meta) => meta
            .language
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|l| language(l, &meta.html_url, repo.as_deref(), style)),
        None => local
            .and_then(|l| l.project_type.ecosystem())
            .map(|e| language(e.language(), ecosystem_home(e), None, style)),
    };
    let other = [
        repo.as_deref().map(|r| forks(r, style)),
        repo.as_deref().map(|r| issues(r, style)),
        repo.as_deref().map(|r| last_commit(r, style)),
        language_badge,
        local.and_then(|l| l.docker().map(|d| container(d, l, options, style))),
    ];

    BadgeSet {
        style,
        important: important.into_iter().flatten().collect(),
        other: other.into_iter().flatten().collect(),
    }
}

/// `owner/name` with each segment percent-encoded, when the record names one.
fn repository_path(remote: &RemoteMetadata) -> Option<String> {
    let (owner, name) = remote.full_name.split_once('/')?;
    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some(format!("{}/{}", urlencoding::encode(owner), urlencoding::encode(name)))
}

/// Escapes text for a static shields path segment and percent-encodes it.
fn shields_text(text: &str) -> String {
    urlencoding::encode(&text.replace('-', "--").replace('_', "__")).into_owned()
}

fn stars(repo: &str, style: BadgeStyle) -> Badge {
    Badge::new(
        "GitHub stars",
        format!("{SHIELDS_URL}/github/stars/{repo}?style={}", style.as_str()),
        format!("{GITHUB_URL}/{repo}/stargazers"),
        BadgeGroup::Important,
    )
}

fn license(repo: &str, label: &str, style: BadgeStyle) -> Badge {
    Badge::new(
        "License",
        format!("{SHIELDS_URL}/badge/license-{}-blue?style={}", shields_text(label), style.as_str()),
        format!("{GITHUB_URL}/{repo}/blob/HEAD/LICENSE"),
        BadgeGroup::Important,
    )
}

fn version(node: &NodeRecord, style: BadgeStyle) -> Option<Badge> {
    let name = node.name.as_deref().filter(|n| !n.is_empty())?;
    let version = node.version.as_deref().filter(|v| !v.is_empty())?;
    let package = name.split('/').map(|s| urlencoding::encode(s).into_owned()).collect::<Vec<_>>().join("/");
    Some(Badge::new(
        "Version",
        format!("{SHIELDS_URL}/badge/version-{}-blue?style={}", shields_text(version), style.as_str()),
        format!("https://www.npmjs.com/package/{package}"),
        BadgeGroup::Important,
    ))
}

fn forks(repo: &str, style: BadgeStyle) -> Badge {
    Badge::new(
        "GitHub forks",
        format!("{SHIELDS_URL}/github/forks/{repo}?style={}", style.as_str()),
        format!("{GITHUB_URL}/{repo}/network/members"),
        BadgeGroup::Other,
    )
}

fn issues(repo: &str, style: BadgeStyle) -> Badge {
    Badge::new(
        "GitHub issues",
        format!("{SHIELDS_URL}/github/issues/{repo}?style={}", style.as_str()),
        format!("{GITHUB_URL}/{repo}/issues"),
        BadgeGroup::Other,
    )
}

fn last_commit(repo: &str, style: BadgeStyle) -> Badge {
    Badge::new(
        "Last commit",
        format!("{SHIELDS_URL}/github/last-commit/{repo}?style={}", style.as_str()),
        format!("{GITHUB_URL}/{repo}/commits"),
        BadgeGroup::Other,
    )
}

fn language(name: &str, html_url: &str, repo: Option<&str>, style: BadgeStyle) -> Badge {
    let link = if html_url.is_empty() {
        repo.map_or_else(|| "#".to_string(), |r| format!("{GITHUB_URL}/{r}"))
    } else {
        html_url.to_string()
    };
    Badge::new(
        "Language",
        format!(
            "{SHIELDS_URL}/badge/language-{}-{}?style={}",
            shields_text(name),
            language_color(name),
            style.as_str()
        ),
        link,
        BadgeGroup::Other,
    )
}

fn container(
    docker: &DockerRecord,
    local: &AggregatedMetadata,
    options: &BadgeOptions,
    style: BadgeStyle,
) -> Badge {
    let link = match &options.output_dir {
        Some(out) => relative_link(out, &local.base_path.join(&docker.file_name)),
        None => urlencoding::encode(&docker.file_name).into_owned(),
    };
    Badge::new(
        "Docker",
        format!(
            "{SHIELDS_URL}/badge/docker-supported-2496ED?style={}&logo=docker&logoColor=white",
            style.as_str()
        ),
        link,
        BadgeGroup::Other,
    )
}

/// `/`-separated, percent-encoded link from `from_dir` to `target`. Both
/// paths are resolved lexically; the filesystem is not consulted.
fn relative_link(from_dir: &Path, target: &Path) -> String {
    let from = lexical_parts(from_dir);
    let to = lexical_parts(target);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    std::iter::repeat("..".to_string())
        .take(from.len() - common)
        .chain(to[common..].iter().map(|part| urlencoding::encode(part).into_owned()))
        .collect::<Vec<_>>()
        .join("/")
}

fn lexical_parts(path: &Path) -> Vec<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts
}

fn ecosystem_home(ecosystem: Ecosystem) -> &'static str {
    match ecosystem {
        Ecosystem::Node => "https://developer.mozilla.org/docs/Web/JavaScript",
        Ecosystem::Python => "https://www.python.org",
        Ecosystem::Rust => "https://www.rust-lang.org",
        Ecosystem::Make => "https://www.gnu.org/software/make/",
        Ecosystem::Docker => "https://docs.docker.com/reference/dockerfile/",
    }
}

fn language_color(name: &str) -> &'static str {
    match name.to_ascii_lowercase().as_str() {
        "javascript" => "f7df1e",
        "typescript" => "3178c6",
        "python" => "3776ab",
        "rust" => "dea584",
        "go" => "00add8",
        "makefile" => "427819",
        "dockerfile" => "384d54",
        _ => "blue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{summary_lines, ProjectRecord, ProjectType};
    use crate::remote::{RemoteLicense, RemoteOwner};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn remote() -> RemoteMetadata {
        RemoteMetadata {
            name: "hello".into(),
            full_name: "octo/hello".into(),
            description: Some("Says hello".into()),
            stars: 42,
            forks: 3,
            open_issues: 1,
            license: Some(RemoteLicense {
                key: Some("mit".into()),
                name: Some("MIT License".into()),
                spdx_id: Some("MIT".into()),
            }),
            topics: vec![],
            language: Some("Rust".into()),
            created_at: None,
            updated_at: None,
            pushed_at: None,
            owner: RemoteOwner { login: "octo".into() },
            html_url: "https://github.com/octo/hello".into(),
            homepage: None,
            archived: false,
        }
    }

    fn local(records: Vec<ProjectRecord>) -> AggregatedMetadata {
        let records: BTreeMap<_, _> = records.into_iter().map(|r| (r.ecosystem(), r)).collect();
        let project_type = records.keys().next().map_or(ProjectType::Unknown, |e| (*e).into());
        AggregatedMetadata {
            base_path: PathBuf::from("/tmp/project"),
            project_type,
            summary_lines: summary_lines(&records),
            records,
        }
    }

    fn node(name: &str, version: &str) -> ProjectRecord {
        ProjectRecord::Node(NodeRecord {
            name: Some(name.into()),
            version: Some(version.into()),
            ..NodeRecord::default()
        })
    }

    fn labels(badges: &[Badge]) -> Vec<&str> {
        badges.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn local_node_project_without_remote() {
        let meta = local(vec![node("x", "1.0.0")]);
        let set = synthesize(None, Some(&meta), &BadgeOptions::default());
        assert_eq!(labels(&set.important), vec!["Version"]);
        assert_eq!(labels(&set.other), vec!["Language"]);
        assert!(set.other[0].image_url.contains("language-JavaScript-"));
        assert!(set.important[0].image_url.contains("version-1.0.0-blue"));
    }

    #[test]
    fn remote_badges_in_display_order() {
        let set = synthesize(Some(&remote()), None, &BadgeOptions::default());
        assert_eq!(labels(&set.important), vec!["GitHub stars", "License"]);
        assert_eq!(
            labels(&set.other),
            vec!["GitHub forks", "GitHub issues", "Last commit", "Language"]
        );
        assert_eq!(
            set.important[0].markup(),
            "[![GitHub stars](https://img.shields.io/github/stars/octo/hello?style=flat)](https://github.com/octo/hello/stargazers)"
        );
    }

    #[test]
    fn missing_license_omits_badge() {
        let mut meta = remote();
        meta.license = None;
        let set = synthesize(Some(&meta), None, &BadgeOptions::default());
        assert_eq!(labels(&set.important), vec!["GitHub stars"]);
        assert!(!set.important_line().contains("![License]()"));
        assert!(!set.important_line().contains("License"));
    }

    #[test]
    fn missing_language_and_repo_path_omit_badges() {
        let mut meta = remote();
        meta.language = None;
        meta.full_name = String::new();
        let set = synthesize(Some(&meta), None, &BadgeOptions::default());
        assert!(set.is_empty());
        assert_eq!(set.important_line(), "");
    }

    #[test]
    fn free_text_is_escaped_and_encoded() {
        let mut meta = remote();
        meta.license = Some(RemoteLicense { key: None, name: Some("Apache-2.0 or MIT_X".into()), spdx_id: None });
        meta.language = Some("C++".into());
        let set = synthesize(Some(&meta), None, &BadgeOptions::default());
        assert!(set.important[1].image_url.contains("license-Apache--2.0%20or%20MIT__X-blue"));
        assert!(set.other[3].image_url.contains("language-C%2B%2B-blue"));
    }

    #[test]
    fn container_badge_follows_language() {
        let docker = ProjectRecord::Docker(crate::metadata::docker::parse_dockerfile(
            "Dockerfile",
            "FROM node:18\nEXPOSE 3000\n",
        ));
        let meta = local(vec![node("x", "1.0.0"), docker]);
        let set = synthesize(None, Some(&meta), &BadgeOptions::default());
        assert_eq!(labels(&set.other), vec!["Language", "Docker"]);
        assert_eq!(set.other[1].link_url, "Dockerfile");
    }

    #[test]
    fn container_link_is_relative_to_the_readme() {
        let docker = ProjectRecord::Docker(crate::metadata::docker::parse_dockerfile(
            "Dockerfile.dev",
            "FROM rust:1.80\n",
        ));
        let mut meta = local(vec![docker]);
        meta.base_path = PathBuf::from("/work/app/../proj");

        let link = |out: &str| {
            let options = BadgeOptions { output_dir: Some(PathBuf::from(out)), ..BadgeOptions::default() };
            synthesize(None, Some(&meta), &options).other.last().unwrap().link_url.clone()
        };
        assert_eq!(link("/work/app"), "../proj/Dockerfile.dev");
        assert_eq!(link("/work/proj"), "Dockerfile.dev");
        assert_eq!(link("/work"), "proj/Dockerfile.dev");
        assert_eq!(link("/other/place"), "../../work/proj/Dockerfile.dev");
    }

    #[test]
    fn scoped_package_links_to_npm() {
        let meta = local(vec![node("@acme/widget", "2.0.0-beta")]);
        let set = synthesize(None, Some(&meta), &BadgeOptions::default());
        assert_eq!(set.important[0].link_url, "https://www.npmjs.com/package/%40acme/widget");
        assert!(set.important[0].image_url.contains("version-2.0.0--beta-blue"));
    }

    #[test]
    fn style_is_applied_to_every_badge() {
        let options = BadgeOptions { style: Some(BadgeStyle::ForTheBadge), ..BadgeOptions::default() };
        let set = synthesize(Some(&remote()), None, &options);
        assert_eq!(set.style, BadgeStyle::ForTheBadge);
        assert!(set
            .important
            .iter()
            .chain(&set.other)
            .all(|b| b.image_url.contains("style=for-the-badge")));
    }

    #[test]
    fn synthesis_is_deterministic() {
        let meta = local(vec![node("x", "1.0.0")]);
        let options = BadgeOptions::default();
        assert_eq!(synthesize(Some(&remote()), Some(&meta), &options), synthesize(Some(&remote()), Some(&meta), &options));
    }
}
