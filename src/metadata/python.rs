//! `requirements.txt` and `setup.py` extractor.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{read_optional, Ecosystem, ExtractFuture, Extractor, ProjectRecord};
use crate::ports::filesystem::FileSystem;
use crate::ports::BoxError;

/// Dependency list file name.
pub const REQUIREMENTS: &str = "requirements.txt";
/// Setup descriptor file name.
pub const SETUP: &str = "setup.py";

// Keyword arguments of a `setup(...)` call. The file is pattern-matched, never run.
static SETUP_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(name|version|description|author)\s*=\s*["']([^"']*)["']"#)
        .expect("setup.py field pattern compiles")
});

/// Fields of a Python project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonRecord {
    /// Requirement names, if `requirements.txt` exists.
    pub requirements: Option<Vec<String>>,
    /// `setup.py` fields, if `setup.py` exists.
    pub setup: Option<SetupInfo>,
}

/// Literal keyword arguments found in `setup.py`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupInfo {
    /// `name=`.
    pub name: Option<String>,
    /// `version=`.
    pub version: Option<String>,
    /// `description=`.
    pub description: Option<String>,
    /// `author=`.
    pub author: Option<String>,
}

impl PythonRecord {
    /// Package name from `setup.py`, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.setup.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// Extracts package names from a requirements file.
///
/// Comments, blank lines and pip options (`-r`, `-e`, `--index-url`) are
/// skipped; each name is cut at the first version operator, extras bracket,
/// environment marker or whitespace.
#[must_use]
pub fn parse_requirements(text: &str) -> Vec<String> {
    text.lines().filter_map(requirement_name).map(String::from).collect()
}

fn requirement_name(line: &str) -> Option<&str> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() || line.starts_with('-') {
        return None;
    }
    let end = line
        .find(|c: char| matches!(c, '=' | '<' | '>' | '~' | '!' | ';' | '[' | '@') || c.is_whitespace())
        .unwrap_or(line.len());
    let name = line[..end].trim();
    (!name.is_empty()).then_some(name)
}

/// Scans `setup.py` text for literal `name`, `version`, `description` and
/// `author` keyword arguments. The first occurrence of each wins.
#[must_use]
pub fn parse_setup_py(text: &str) -> SetupInfo {
    let mut info = SetupInfo::default();
    for caps in SETUP_FIELD.captures_iter(text) {
        let slot = match &caps[1] {
            "name" => &mut info.name,
            "version" => &mut info.version,
            "description" => &mut info.description,
            _ => &mut info.author,
        };
        if slot.is_none() {
            *slot = Some(caps[2].to_string());
        }
    }
    info
}

/// Extracts a [`PythonRecord`] from `requirements.txt` and `setup.py`.
pub struct PythonExtractor;

impl Extractor for PythonExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Python
    }

    fn extract<'a>(&'a self, fs: &'a dyn FileSystem, base: &'a Path) -> ExtractFuture<'a> {
        Box::pin(async move {
            let requirements =
                read_independent(fs, base, REQUIREMENTS).await.map(|t| parse_requirements(&t));
            let setup = read_independent(fs, base, SETUP).await.map(|t| parse_setup_py(&t));
            let record = (requirements.is_some() || setup.is_some())
                .then(|| ProjectRecord::Python(PythonRecord { requirements, setup }));
            Ok::<_, BoxError>(record)
        })
    }
}

// The two files are separate sources: an unreadable one is skipped without
// discarding the other.
async fn read_independent(fs: &dyn FileSystem, base: &Path, name: &str) -> Option<String> {
    let path = base.join(name);
    match read_optional(fs, &path).await {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable python descriptor");
            None
        }
    }
}
