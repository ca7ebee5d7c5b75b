//! Makefile extractor.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{read_first, Ecosystem, ExtractFuture, Extractor, ProjectRecord};
use crate::ports::filesystem::FileSystem;

/// Makefile names, in lookup order.
pub const CANDIDATES: &[&str] = &["Makefile", "makefile", "GNUmakefile"];

// `name:` at line start; `name := value` is an assignment, not a target.
static TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_][A-Za-z0-9_.-]*)\s*:(?:[^=]|$)").expect("target pattern compiles")
});

/// Targets of a Makefile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeRecord {
    /// Which candidate file was read.
    pub file_name: String,
    /// Distinct target names in first-seen order.
    pub targets: Vec<String>,
    /// Conventional targets present.
    pub features: MakeFeatures,
}

/// Presence of conventional targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct MakeFeatures {
    /// `install`.
    pub install: bool,
    /// `build`.
    pub build: bool,
    /// `run`.
    pub run: bool,
    /// `test`.
    pub test: bool,
    /// `clean`.
    pub clean: bool,
    /// `docs` or `doc`.
    pub docs: bool,
}

impl MakeFeatures {
    /// Derives the flags from a target list.
    #[must_use]
    pub fn from_targets(targets: &[String]) -> Self {
        let has = |name: &str| targets.iter().any(|t| t == name);
        Self {
            install: has("install"),
            build: has("build"),
            run: has("run"),
            test: has("test"),
            clean: has("clean"),
            docs: has("docs") || has("doc"),
        }
    }
}

/// Collects target names from Makefile text.
///
/// Comment lines, recipe lines and dot-prefixed special targets
/// (`.PHONY`, `.DEFAULT_GOAL`) never match. Repeated targets appear once.
#[must_use]
pub fn parse_targets(text: &str) -> Vec<String> {
    let mut targets: Vec<String> = Vec::new();
    for line in text.lines() {
        if let Some(caps) = TARGET.captures(line) {
            let name = &caps[1];
            if !targets.iter().any(|t| t == name) {
                targets.push(name.to_string());
            }
        }
    }
    targets
}

/// Parses a Makefile read from `file_name`.
#[must_use]
pub fn parse_makefile(file_name: &str, text: &str) -> MakeRecord {
    let targets = parse_targets(text);
    let features = MakeFeatures::from_targets(&targets);
    MakeRecord { file_name: file_name.to_string(), targets, features }
}

/// Extracts a [`MakeRecord`] from the first Makefile found.
pub struct MakeExtractor;

impl Extractor for MakeExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Make
    }

    fn extract<'a>(&'a self, fs: &'a dyn FileSystem, base: &'a Path) -> ExtractFuture<'a> {
        Box::pin(async move {
            let found = read_first(fs, base, CANDIDATES).await?;
            Ok(found.map(|(name, text)| ProjectRecord::Make(parse_makefile(name, &text))))
        })
    }
}
