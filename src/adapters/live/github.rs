//! Live adapter for the `RemoteRepository` port using the GitHub REST API.

use std::env;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::ports::remote::{RemoteFuture, RemoteRepository};
use crate::remote::{RemoteError, RemoteMetadata, RepoRef};

const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Fetches repository records from `api.github.com`.
///
/// Sends `GITHUB_TOKEN` as a bearer token when the variable is set.
pub struct LiveGitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl LiveGitHubClient {
    /// Creates a client for the public GitHub API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_URL)
    }

    /// Creates a client for a GitHub-compatible API at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build().unwrap_or_default();
        let token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty());
        Self { client, base_url: base_url.into(), token }
    }

    async fn fetch_once(&self, repo: &RepoRef) -> Result<RemoteMetadata, RemoteError> {
        let url = format!("{}/repos/{}/{}", self.base_url, repo.owner, repo.name);
        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header(USER_AGENT, concat!("docsmith/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| RemoteError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(repo, response).await);
        }
        response.json::<RemoteMetadata>().await.map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl Default for LiveGitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteRepository for LiveGitHubClient {
    fn fetch<'a>(&'a self, repo: &'a RepoRef) -> RemoteFuture<'a> {
        Box::pin(async move {
            let mut backoff = INITIAL_BACKOFF;
            let mut attempt = 1;
            loop {
                match self.fetch_once(repo).await {
                    Ok(metadata) => {
                        info!(%repo, stars = metadata.stars, "fetched remote metadata");
                        return Ok(metadata);
                    }
                    Err(e) if e.is_retryable() && attempt < MAX_ATTEMPTS => {
                        warn!(%repo, attempt, error = %e, "remote fetch failed, retrying");
                        tokio::time::sleep(backoff).await;
                        backoff *= 2;
                        attempt += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        })
    }
}

#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

async fn status_error(repo: &RepoRef, response: Response) -> RemoteError {
    let status = response.status();
    let rate_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    let body = response.text().await.unwrap_or_default();
    debug!(%repo, status = status.as_u16(), body = %body, "GitHub API error response");
    classify_status(repo, status, rate_exhausted, &body)
}

fn classify_status(repo: &RepoRef, status: StatusCode, rate_exhausted: bool, body: &str) -> RemoteError {
    match status {
        StatusCode::NOT_FOUND => RemoteError::NotFound(repo.full_name()),
        StatusCode::UNAUTHORIZED => RemoteError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => RemoteError::RateLimited,
        StatusCode::FORBIDDEN if rate_exhausted => RemoteError::RateLimited,
        _ => {
            let message = serde_json::from_str::<GitHubErrorBody>(body)
                .map(|b| b.message)
                .unwrap_or_else(|_| body.trim().to_string());
            RemoteError::Api { status: status.as_u16(), message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoRef {
        RepoRef { owner: "octo".into(), name: "hello".into() }
    }

    #[test]
    fn statuses_map_to_typed_errors() {
        assert_eq!(
            classify_status(&repo(), StatusCode::NOT_FOUND, false, ""),
            RemoteError::NotFound("octo/hello".into())
        );
        assert_eq!(classify_status(&repo(), StatusCode::UNAUTHORIZED, false, ""), RemoteError::Unauthorized);
        assert_eq!(classify_status(&repo(), StatusCode::FORBIDDEN, true, ""), RemoteError::RateLimited);
        assert_eq!(classify_status(&repo(), StatusCode::TOO_MANY_REQUESTS, false, ""), RemoteError::RateLimited);
    }

    #[test]
    fn other_statuses_keep_the_api_message() {
        let err = classify_status(
            &repo(),
            StatusCode::FORBIDDEN,
            false,
            r#"{"message": "Resource not accessible by integration"}"#,
        );
        assert_eq!(
            err,
            RemoteError::Api { status: 403, message: "Resource not accessible by integration".into() }
        );
        let err = classify_status(&repo(), StatusCode::BAD_GATEWAY, false, "upstream down\n");
        assert!(err.is_retryable());
    }
}
