//! `Cargo.toml` extractor.
//!
//! Uses targeted patterns instead of a TOML parser so that manifests with
//! workspace inheritance or syntax the parser would reject still yield
//! whatever fields are literally present.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{read_optional, Ecosystem, ExtractFuture, Extractor, ProjectRecord};
use crate::ports::filesystem::FileSystem;

/// Rust manifest file name.
pub const MANIFEST: &str = "Cargo.toml";

static PACKAGE_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(name|version|description|edition)\s*=\s*"([^"]*)""#)
        .expect("package field pattern compiles")
});
static DEPENDENCIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*\[(?:workspace\.)?dependencies[\].]").expect("dependencies pattern compiles")
});
static DEV_DEPENDENCIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*\[dev-dependencies[\].]").expect("dev-dependencies pattern compiles")
});
static LIB_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\[lib\]").expect("lib pattern compiles"));
static BIN_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\[\[bin\]\]").expect("bin pattern compiles"));

/// Fields of a Cargo manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RustRecord {
    /// `package.name`.
    pub name: Option<String>,
    /// `package.version`.
    pub version: Option<String>,
    /// `package.description`.
    pub description: Option<String>,
    /// `package.edition`.
    pub edition: Option<String>,
    /// Has a `[dependencies]` table.
    pub has_dependencies: bool,
    /// Has a `[dev-dependencies]` table.
    pub has_dev_dependencies: bool,
    /// Has a `[lib]` target table.
    pub has_lib: bool,
    /// Has at least one `[[bin]]` target.
    pub has_bin: bool,
}

/// Scans a `Cargo.toml`. Package fields are only read from the `[package]` table.
#[must_use]
pub fn parse_cargo_toml(text: &str) -> RustRecord {
    let package = package_table(text);
    let mut record = RustRecord {
        has_dependencies: DEPENDENCIES.is_match(text),
        has_dev_dependencies: DEV_DEPENDENCIES.is_match(text),
        has_lib: LIB_SECTION.is_match(text),
        has_bin: BIN_SECTION.is_match(text),
        ..RustRecord::default()
    };
    for caps in PACKAGE_FIELD.captures_iter(&package) {
        let slot = match &caps[1] {
            "name" => &mut record.name,
            "version" => &mut record.version,
            "description" => &mut record.description,
            _ => &mut record.edition,
        };
        if slot.is_none() {
            *slot = Some(caps[2].to_string());
        }
    }
    record
}

fn package_table(text: &str) -> String {
    let mut in_package = false;
    let mut table = String::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            in_package = trimmed.starts_with("[package]");
            continue;
        }
        if in_package {
            table.push_str(line);
            table.push('\n');
        }
    }
    table
}

/// Extracts a [`RustRecord`] from `Cargo.toml`.
pub struct RustExtractor;

impl Extractor for RustExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Rust
    }

    fn extract<'a>(&'a self, fs: &'a dyn FileSystem, base: &'a Path) -> ExtractFuture<'a> {
        Box::pin(async move {
            let text = read_optional(fs, &base.join(MANIFEST)).await?;
            Ok(text.map(|t| ProjectRecord::Rust(parse_cargo_toml(&t))))
        })
    }
}
