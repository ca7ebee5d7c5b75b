//! `package.json` extractor.

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{read_optional, Ecosystem, ExtractFuture, Extractor, ProjectRecord};
use crate::ports::filesystem::FileSystem;

/// Node manifest file name.
pub const MANIFEST: &str = "package.json";

/// Fields of a Node package manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Package name.
    pub name: Option<String>,
    /// Package description.
    pub description: Option<String>,
    /// Package version.
    pub version: Option<String>,
    /// Script names, in manifest order.
    pub scripts: Vec<String>,
    /// Runtime dependency names.
    pub dependencies: Vec<String>,
    /// Development dependency names.
    pub dev_dependencies: Vec<String>,
    /// License expression.
    pub license: Option<String>,
    /// Author, as a plain name.
    pub author: Option<String>,
    /// Repository URL.
    pub repository: Option<String>,
    /// Keywords.
    pub keywords: Vec<String>,
    /// Declares `main`, `module` or `exports`.
    pub has_entry_point: bool,
    /// Declares a `bin` executable.
    pub has_bin: bool,
    /// Marked `"private": true`.
    pub private: bool,
}

impl NodeRecord {
    /// Looks like a published library: an entry point, no executable, not private.
    #[must_use]
    pub fn is_library(&self) -> bool {
        self.has_entry_point && !self.has_bin && !self.private
    }

    /// Looks like an application: an executable, a `start` script, or private.
    #[must_use]
    pub fn is_application(&self) -> bool {
        self.has_bin || self.private || self.scripts.iter().any(|s| s == "start")
    }
}

/// Parses the text of a `package.json`.
///
/// # Errors
///
/// Returns an error if the text is not a JSON object.
pub fn parse_package_json(text: &str) -> Result<NodeRecord, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    let Some(object) = value.as_object() else {
        return Err(serde_json::Error::custom("package.json root is not an object"));
    };

    Ok(NodeRecord {
        name: string_field(object, "name"),
        description: string_field(object, "description"),
        version: string_field(object, "version"),
        scripts: key_names(object, "scripts"),
        dependencies: key_names(object, "dependencies"),
        dev_dependencies: key_names(object, "devDependencies"),
        license: object.get("license").and_then(license_name),
        author: object.get("author").and_then(person_name),
        repository: object.get("repository").and_then(repository_url),
        keywords: object
            .get("keywords")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).map(String::from).collect())
            .unwrap_or_default(),
        has_entry_point: ["main", "module", "exports"].iter().any(|k| object.contains_key(*k)),
        has_bin: object.contains_key("bin"),
        private: object.get("private").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(String::from)
}

fn key_names(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object.get(key).and_then(Value::as_object).map(|m| m.keys().cloned().collect()).unwrap_or_default()
}

// `"MIT"` or the legacy `{"type": "MIT"}`.
fn license_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => string_field(o, "type"),
        _ => None,
    }
}

// `"Jane <jane@example.com>"` or `{"name": "Jane", "email": ...}`.
fn person_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => string_field(o, "name"),
        _ => None,
    }
}

fn repository_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => string_field(o, "url"),
        _ => None,
    }
}

/// Extracts a [`NodeRecord`] from `package.json`.
pub struct NodeExtractor;

impl Extractor for NodeExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Node
    }

    fn extract<'a>(&'a self, fs: &'a dyn FileSystem, base: &'a Path) -> ExtractFuture<'a> {
        Box::pin(async move {
            let Some(text) = read_optional(fs, &base.join(MANIFEST)).await? else {
                return Ok(None);
            };
            let record =
                parse_package_json(&text).map_err(|e| format!("invalid {MANIFEST}: {e}"))?;
            Ok(Some(ProjectRecord::Node(record)))
        })
    }
}
