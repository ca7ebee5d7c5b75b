//! Local project metadata: one extractor per ecosystem descriptor, merged
//! by [`aggregate`] into an [`AggregatedMetadata`] document.
//!
//! Extractors only read text. Nothing found in a scanned project is ever
//! executed, including `setup.py`.

pub mod aggregate;
pub mod docker;
pub mod make;
pub mod node;
pub mod python;
pub mod rust;

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::ports::filesystem::FileSystem;
use crate::ports::BoxError;

pub use aggregate::{aggregate, summary_lines, AggregatedMetadata};
pub use docker::{DockerExtractor, DockerRecord};
pub use make::{MakeExtractor, MakeFeatures, MakeRecord};
pub use node::{NodeExtractor, NodeRecord};
pub use python::{PythonExtractor, PythonRecord, SetupInfo};
pub use rust::{RustExtractor, RustRecord};

/// A recognized project ecosystem.
///
/// Declaration order is the detection priority: the first ecosystem found
/// in this order decides the project type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// `package.json`.
    Node,
    /// `requirements.txt` / `setup.py`.
    Python,
    /// `Cargo.toml`.
    Rust,
    /// `Makefile`.
    Make,
    /// `Dockerfile`.
    Docker,
}

impl Ecosystem {
    /// Lowercase identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Make => "make",
            Self::Docker => "docker",
        }
    }

    /// Display name of the language this ecosystem implies.
    #[must_use]
    pub fn language(self) -> &'static str {
        match self {
            Self::Node => "JavaScript",
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::Make => "Makefile",
            Self::Docker => "Dockerfile",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse project classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// No descriptor recognized.
    #[default]
    Unknown,
    /// Node.js.
    Node,
    /// Python.
    Python,
    /// Rust.
    Rust,
    /// Docker-only.
    Docker,
    /// Make-only.
    Make,
}

impl ProjectType {
    /// The ecosystem behind this type, if known.
    #[must_use]
    pub fn ecosystem(self) -> Option<Ecosystem> {
        match self {
            Self::Unknown => None,
            Self::Node => Some(Ecosystem::Node),
            Self::Python => Some(Ecosystem::Python),
            Self::Rust => Some(Ecosystem::Rust),
            Self::Docker => Some(Ecosystem::Docker),
            Self::Make => Some(Ecosystem::Make),
        }
    }
}

impl From<Ecosystem> for ProjectType {
    fn from(ecosystem: Ecosystem) -> Self {
        match ecosystem {
            Ecosystem::Node => Self::Node,
            Ecosystem::Python => Self::Python,
            Ecosystem::Rust => Self::Rust,
            Ecosystem::Make => Self::Make,
            Ecosystem::Docker => Self::Docker,
        }
    }
}

/// Metadata extracted from one ecosystem's descriptor files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProjectRecord {
    /// From `package.json`.
    Node(NodeRecord),
    /// From `requirements.txt` and/or `setup.py`.
    Python(PythonRecord),
    /// From `Cargo.toml`.
    Rust(RustRecord),
    /// From a Makefile.
    Make(MakeRecord),
    /// From a Dockerfile.
    Docker(DockerRecord),
}

impl ProjectRecord {
    /// The ecosystem this record belongs to.
    #[must_use]
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            Self::Node(_) => Ecosystem::Node,
            Self::Python(_) => Ecosystem::Python,
            Self::Rust(_) => Ecosystem::Rust,
            Self::Make(_) => Ecosystem::Make,
            Self::Docker(_) => Ecosystem::Docker,
        }
    }
}

/// Boxed future returned by [`Extractor::extract`].
pub type ExtractFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<ProjectRecord>, BoxError>> + Send + 'a>>;

/// Detects and parses the descriptor file(s) of one ecosystem.
pub trait Extractor: Send + Sync {
    /// The ecosystem handled by this extractor.
    fn ecosystem(&self) -> Ecosystem;

    /// Reads the descriptor(s) under `base`.
    ///
    /// Resolves to `Ok(None)` when no descriptor exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a descriptor exists but cannot be read or parsed.
    fn extract<'a>(&'a self, fs: &'a dyn FileSystem, base: &'a Path) -> ExtractFuture<'a>;
}

/// All built-in extractors in detection priority order.
#[must_use]
pub fn default_extractors() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(NodeExtractor),
        Box::new(PythonExtractor),
        Box::new(RustExtractor),
        Box::new(MakeExtractor),
        Box::new(DockerExtractor),
    ]
}

/// Reads `path` if it exists; a missing file is `Ok(None)`.
pub(crate) async fn read_optional(
    fs: &dyn FileSystem,
    path: &Path,
) -> Result<Option<String>, BoxError> {
    if !fs.exists(path) {
        return Ok(None);
    }
    fs.read_to_string(path).await.map(Some)
}

/// Reads the first existing file among `candidates` under `base`.
pub(crate) async fn read_first(
    fs: &dyn FileSystem,
    base: &Path,
    candidates: &[&'static str],
) -> Result<Option<(&'static str, String)>, BoxError> {
    for &name in candidates {
        if let Some(text) = read_optional(fs, &base.join(name)).await? {
            return Ok(Some((name, text)));
        }
    }
    Ok(None)
}
