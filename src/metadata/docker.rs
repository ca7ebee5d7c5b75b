//! Dockerfile extractor.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{read_first, Ecosystem, ExtractFuture, Extractor, ProjectRecord};
use crate::ports::filesystem::FileSystem;

/// Dockerfile names, in lookup order. The first one found wins.
pub const CANDIDATES: &[&str] = &["Dockerfile", "dockerfile", "Dockerfile.dev", "Dockerfile.prod"];

/// Compose file names whose presence is recorded.
pub const COMPOSE_FILES: &[&str] =
    &["docker-compose.yml", "docker-compose.yaml", "compose.yml", "compose.yaml"];

static FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*FROM\s+(?:--platform=\S+\s+)?(\S+)").expect("FROM pattern compiles")
});
static EXPOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*EXPOSE\s+(\d+)").expect("EXPOSE pattern compiles"));
static WORKDIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*WORKDIR\s").expect("WORKDIR pattern compiles"));
static ENTRYPOINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*ENTRYPOINT\s").expect("ENTRYPOINT pattern compiles"));
static CMD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*CMD\s").expect("CMD pattern compiles"));

/// Directives of a Dockerfile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DockerRecord {
    /// Which candidate file was read.
    pub file_name: String,
    /// Image of the first `FROM`.
    pub base_image: Option<String>,
    /// First numeric port of the first `EXPOSE`.
    pub exposed_port: Option<u16>,
    /// Has a `WORKDIR`.
    pub has_workdir: bool,
    /// Has an `ENTRYPOINT`.
    pub has_entrypoint: bool,
    /// Has a `CMD`.
    pub has_cmd: bool,
    /// A compose file sits next to the Dockerfile.
    pub has_compose: bool,
}

/// Parses Dockerfile text read from `file_name`. Directives match case-insensitively.
#[must_use]
pub fn parse_dockerfile(file_name: &str, text: &str) -> DockerRecord {
    DockerRecord {
        file_name: file_name.to_string(),
        base_image: FROM.captures(text).map(|c| c[1].to_string()),
        exposed_port: EXPOSE.captures(text).and_then(|c| c[1].parse().ok()),
        has_workdir: WORKDIR.is_match(text),
        has_entrypoint: ENTRYPOINT.is_match(text),
        has_cmd: CMD.is_match(text),
        has_compose: false,
    }
}

/// Extracts a [`DockerRecord`] from the first Dockerfile found.
pub struct DockerExtractor;

impl Extractor for DockerExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Docker
    }

    fn extract<'a>(&'a self, fs: &'a dyn FileSystem, base: &'a Path) -> ExtractFuture<'a> {
        Box::pin(async move {
            let Some((name, text)) = read_first(fs, base, CANDIDATES).await? else {
                return Ok(None);
            };
            let mut record = parse_dockerfile(name, &text);
            record.has_compose = COMPOSE_FILES.iter().any(|f| fs.exists(&base.join(f)));
            Ok(Some(ProjectRecord::Docker(record)))
        })
    }
}
