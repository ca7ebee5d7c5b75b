//! Runs every extractor over one project root and merges the results.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    DockerRecord, Ecosystem, Extractor, MakeRecord, NodeRecord, ProjectRecord, ProjectType,
    PythonRecord, RustRecord,
};
use crate::ports::filesystem::FileSystem;

/// How many Makefile targets a summary line lists before eliding.
const TARGET_PREVIEW: usize = 5;

/// Merged local metadata of one project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedMetadata {
    /// The root that was analyzed.
    pub base_path: PathBuf,
    /// Ecosystem of the first record found in priority order.
    pub project_type: ProjectType,
    /// One record per ecosystem found, in priority order.
    pub records: BTreeMap<Ecosystem, ProjectRecord>,
    /// Human-readable summary derived from `records`.
    pub summary_lines: Vec<String>,
}

impl AggregatedMetadata {
    /// The Node record, if any.
    #[must_use]
    pub fn node(&self) -> Option<&NodeRecord> {
        match self.records.get(&Ecosystem::Node) {
            Some(ProjectRecord::Node(record)) => Some(record),
            _ => None,
        }
    }

    /// The Python record, if any.
    #[must_use]
    pub fn python(&self) -> Option<&PythonRecord> {
        match self.records.get(&Ecosystem::Python) {
            Some(ProjectRecord::Python(record)) => Some(record),
            _ => None,
        }
    }

    /// The Rust record, if any.
    #[must_use]
    pub fn rust(&self) -> Option<&RustRecord> {
        match self.records.get(&Ecosystem::Rust) {
            Some(ProjectRecord::Rust(record)) => Some(record),
            _ => None,
        }
    }

    /// The Make record, if any.
    #[must_use]
    pub fn make(&self) -> Option<&MakeRecord> {
        match self.records.get(&Ecosystem::Make) {
            Some(ProjectRecord::Make(record)) => Some(record),
            _ => None,
        }
    }

    /// The Docker record, if any.
    #[must_use]
    pub fn docker(&self) -> Option<&DockerRecord> {
        match self.records.get(&Ecosystem::Docker) {
            Some(ProjectRecord::Docker(record)) => Some(record),
            _ => None,
        }
    }

    /// First package name declared by a manifest, in priority order.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.node()
            .and_then(|r| r.name.as_deref())
            .or_else(|| self.python().and_then(PythonRecord::name))
            .or_else(|| self.rust().and_then(|r| r.name.as_deref()))
    }

    /// A manifest marks the project as a library.
    #[must_use]
    pub fn is_library(&self) -> bool {
        self.node().is_some_and(NodeRecord::is_library)
            || self.rust().is_some_and(|r| r.has_lib && !r.has_bin)
    }

    /// A manifest marks the project as an application.
    #[must_use]
    pub fn is_application(&self) -> bool {
        self.node().is_some_and(NodeRecord::is_application) || self.rust().is_some_and(|r| r.has_bin)
    }
}

/// Runs `extractors` in order against `base` and merges their records.
///
/// A failing extractor is logged and treated as absent; it never prevents
/// the others from running.
pub async fn aggregate(
    fs: &dyn FileSystem,
    base: &Path,
    extractors: &[Box<dyn Extractor>],
) -> AggregatedMetadata {
    let mut project_type = ProjectType::Unknown;
    let mut records = BTreeMap::new();

    for extractor in extractors {
        let Some(record) = attempt(extractor.as_ref(), fs, base).await else {
            continue;
        };
        let ecosystem = record.ecosystem();
        if project_type == ProjectType::Unknown {
            project_type = ecosystem.into();
        }
        records.insert(ecosystem, record);
    }

    let summary_lines = summary_lines(&records);
    info!(base = %base.display(), ?project_type, records = records.len(), "aggregated metadata");
    AggregatedMetadata { base_path: base.to_path_buf(), project_type, records, summary_lines }
}

async fn attempt(
    extractor: &dyn Extractor,
    fs: &dyn FileSystem,
    base: &Path,
) -> Option<ProjectRecord> {
    let ecosystem = extractor.ecosystem();
    match extractor.extract(fs, base).await {
        Ok(Some(record)) => {
            debug!(%ecosystem, "descriptor found");
            Some(record)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(%ecosystem, error = %e, "ignoring unreadable descriptor");
            None
        }
    }
}

/// Human-readable sentences describing `records`.
#[must_use]
pub fn summary_lines(records: &BTreeMap<Ecosystem, ProjectRecord>) -> Vec<String> {
    let mut lines = Vec::new();
    for record in records.values() {
        match record {
            ProjectRecord::Node(node) => node_lines(node, &mut lines),
            ProjectRecord::Python(python) => python_lines(python, &mut lines),
            ProjectRecord::Rust(rust) => rust_lines(rust, &mut lines),
            ProjectRecord::Make(make) => make_lines(make, &mut lines),
            ProjectRecord::Docker(docker) => docker_lines(docker, &mut lines),
        }
    }
    lines
}

fn node_lines(node: &NodeRecord, lines: &mut Vec<String>) {
    lines.push(match (&node.name, &node.version) {
        (Some(name), Some(version)) => format!("Node.js package {name}@{version}"),
        (Some(name), None) => format!("Node.js package {name}"),
        _ => "Node.js project (package.json)".to_string(),
    });
    lines.push(format!(
        "{} dependencies, {} dev dependencies",
        node.dependencies.len(),
        node.dev_dependencies.len()
    ));
    if !node.scripts.is_empty() {
        lines.push(format!("npm scripts: {}", node.scripts.join(", ")));
    }
}

fn python_lines(python: &PythonRecord, lines: &mut Vec<String>) {
    if let Some(setup) = &python.setup {
        lines.push(match (&setup.name, &setup.version) {
            (Some(name), Some(version)) => format!("Python package {name} {version}"),
            (Some(name), None) => format!("Python package {name}"),
            _ => "Python project (setup.py)".to_string(),
        });
    }
    if let Some(requirements) = &python.requirements {
        lines.push(format!("{} Python requirements", requirements.len()));
    }
}

fn rust_lines(rust: &RustRecord, lines: &mut Vec<String>) {
    let mut line = match (&rust.name, &rust.version) {
        (Some(name), Some(version)) => format!("Rust crate {name} {version}"),
        (Some(name), None) => format!("Rust crate {name}"),
        _ => "Rust workspace (Cargo.toml)".to_string(),
    };
    if let Some(edition) = &rust.edition {
        let _ = write!(line, " (edition {edition})");
    }
    lines.push(line);
    match (rust.has_dependencies, rust.has_dev_dependencies) {
        (true, true) => lines.push("Declares dependencies and dev-dependencies".to_string()),
        (true, false) => lines.push("Declares dependencies".to_string()),
        (false, true) => lines.push("Declares dev-dependencies".to_string()),
        (false, false) => {}
    }
}

fn make_lines(make: &MakeRecord, lines: &mut Vec<String>) {
    if make.targets.is_empty() {
        lines.push(format!("{} without targets", make.file_name));
        return;
    }
    let mut preview = make.targets.iter().take(TARGET_PREVIEW).cloned().collect::<Vec<_>>().join(", ");
    if make.targets.len() > TARGET_PREVIEW {
        preview.push_str(", ...");
    }
    lines.push(format!("Makefile targets: {preview}"));
}

fn docker_lines(docker: &DockerRecord, lines: &mut Vec<String>) {
    lines.push(match &docker.base_image {
        Some(image) => format!("Docker image based on {image}"),
        None => format!("Docker build file {}", docker.file_name),
    });
    if let Some(port) = docker.exposed_port {
        lines.push(format!("Container exposes port {port}"));
    }
    if docker.has_compose {
        lines.push("Docker Compose configuration present".to_string());
    }
}
