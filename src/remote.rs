//! Remote repository metadata as reported by the hosting provider.
//!
//! [`RemoteMetadata`] is a read-only snapshot: it is produced once by a
//! [`crate::ports::RemoteRepository`] and only ever borrowed downstream.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot of a hosted repository record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteMetadata {
    /// Repository name (without owner).
    pub name: String,
    /// `owner/name`.
    #[serde(default)]
    pub full_name: String,
    /// Short repository description.
    #[serde(default)]
    pub description: Option<String>,
    /// Star count.
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    /// Fork count.
    #[serde(rename = "forks_count", default)]
    pub forks: u64,
    /// Open issue count (includes pull requests on GitHub).
    #[serde(rename = "open_issues_count", default)]
    pub open_issues: u64,
    /// Detected license, if any.
    #[serde(default)]
    pub license: Option<RemoteLicense>,
    /// Repository topics.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Primary language reported by the provider.
    #[serde(default)]
    pub language: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last metadata update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Last push.
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    /// Repository owner.
    pub owner: RemoteOwner,
    /// Browser URL of the repository.
    #[serde(default)]
    pub html_url: String,
    /// Project homepage, when set.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Whether the repository is archived.
    #[serde(default)]
    pub archived: bool,
}

/// License block of a repository record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLicense {
    /// Provider license key (e.g. `mit`).
    #[serde(default)]
    pub key: Option<String>,
    /// Human-readable name (e.g. `MIT License`).
    #[serde(default)]
    pub name: Option<String>,
    /// SPDX identifier (e.g. `MIT`), `NOASSERTION` when unknown.
    #[serde(default)]
    pub spdx_id: Option<String>,
}

impl RemoteLicense {
    /// Best short label for the license: SPDX id, else the full name.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.spdx_id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != "NOASSERTION")
            .or_else(|| self.name.as_deref().filter(|name| !name.is_empty()))
    }
}

/// Owner block of a repository record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteOwner {
    /// Account login.
    pub login: String,
}

impl RemoteMetadata {
    /// Returns the license label, if the provider knows one.
    #[must_use]
    pub fn license_label(&self) -> Option<&str> {
        self.license.as_ref().and_then(RemoteLicense::label)
    }
}

/// Owner and name identifying one hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    /// Account or organization.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Parses a repository reference.
    ///
    /// Accepts `https://github.com/owner/repo` (any scheme, optional
    /// userinfo and port), the same with a `.git` suffix or trailing path,
    /// `git@github.com:owner/repo.git`, `github.com/owner/repo` and a bare
    /// `owner/repo`. The host must be exactly `github.com` or
    /// `www.github.com`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidUrl`] if the host is not GitHub or no
    /// owner/name pair can be found.
    pub fn parse(input: &str) -> Result<Self, RemoteError> {
        let invalid = || RemoteError::InvalidUrl(input.to_string());
        let trimmed = input.trim();

        let path = if let Some((_, rest)) = trimmed.split_once("://") {
            let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
            github_path(authority, path).ok_or_else(invalid)?
        } else if let Some((authority, path)) =
            trimmed.split_once(':').filter(|(authority, _)| !authority.contains('/'))
        {
            github_path(authority, path).ok_or_else(invalid)?
        } else {
            match trimmed.split_once('/') {
                Some((host, path)) if host.contains('.') => {
                    github_path(host, path).ok_or_else(invalid)?
                }
                // Bare `owner/repo`; filesystem paths are not repositories.
                Some((owner, rest)) if !owner.is_empty() && !rest.contains('/') => trimmed,
                _ => return Err(invalid()),
            }
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next();
        let name = segments.next().map(|n| n.trim_end_matches(".git"));
        match (owner, name) {
            (Some(owner), Some(name)) if is_valid_segment(owner) && is_valid_segment(name) => {
                Ok(Self { owner: owner.to_string(), name: name.to_string() })
            }
            _ => Err(RemoteError::InvalidUrl(input.to_string())),
        }
    }

    /// Returns `owner/name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Returns `path` when `authority` (`[user@]host[:port]`) names GitHub.
fn github_path<'a>(authority: &str, path: &'a str) -> Option<&'a str> {
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    ["github.com", "www.github.com"]
        .iter()
        .any(|known| host.eq_ignore_ascii_case(known))
        .then_some(path)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Why a remote repository record could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RemoteError {
    /// The input is not a recognizable repository URL.
    #[error("`{0}` is not a GitHub repository URL (expected https://github.com/<owner>/<repo>)")]
    InvalidUrl(String),
    /// The repository does not exist or is private.
    #[error(
        "repository {0} was not found; check the owner and name, or set GITHUB_TOKEN for private repositories"
    )]
    NotFound(String),
    /// The API rate limit is exhausted.
    #[error("GitHub API rate limit exceeded; set GITHUB_TOKEN or retry later")]
    RateLimited,
    /// Credentials were rejected.
    #[error("GitHub rejected the credentials; check that GITHUB_TOKEN is valid")]
    Unauthorized,
    /// Transport failure.
    #[error("could not reach GitHub: {0}")]
    Network(String),
    /// Any other non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body.
        message: String,
    },
    /// The response body did not match the expected schema.
    #[error("unexpected GitHub API response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Returns `true` for transient failures worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
