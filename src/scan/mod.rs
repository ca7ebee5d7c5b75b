//! Filesystem scan: directory tree and content index of a project.

pub mod exclude;
pub mod render;
pub mod walker;

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub use exclude::{ExclusionSet, DEFAULT_EXCLUSIONS};
pub use render::render_tree;
pub use walker::Scanner;

/// Project-relative, forward-slash path → full text content.
pub type ContentIndex = BTreeMap<String, String>;

/// Ordered directory tree. Entry order is scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    entries: Vec<(String, TreeNode)>,
}

/// A node of a [`FileTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A file leaf.
    File,
    /// A directory with its own children.
    Dir(FileTree),
}

impl FileTree {
    /// Appends an entry.
    pub fn push(&mut self, name: impl Into<String>, node: TreeNode) {
        self.entries.push((name.into(), node));
    }

    /// Entries in scan order.
    #[must_use]
    pub fn entries(&self) -> &[(String, TreeNode)] {
        &self.entries
    }

    /// Number of direct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forward-slash paths of every file leaf, depth-first in scan order.
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaves("", &mut paths);
        paths
    }

    /// Total number of file leaves.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                TreeNode::File => 1,
                TreeNode::Dir(child) => child.file_count(),
            })
            .sum()
    }

    fn collect_leaves(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, node) in &self.entries {
            let path = join_relative(prefix, name);
            match node {
                TreeNode::File => out.push(path),
                TreeNode::Dir(child) => child.collect_leaves(&path, out),
            }
        }
    }
}

// Files serialize as `null`, directories as nested maps.
impl Serialize for FileTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, node) in &self.entries {
            match node {
                TreeNode::File => map.serialize_entry(name, &Option::<()>::None)?,
                TreeNode::Dir(child) => map.serialize_entry(name, child)?,
            }
        }
        map.end()
    }
}

/// Result of scanning one project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scan {
    /// Hierarchical view.
    pub tree: FileTree,
    /// Flat view with file contents.
    pub contents: ContentIndex,
}

/// Joins a relative prefix and an entry name with `/`.
pub(crate) fn join_relative(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileTree {
        let mut src = FileTree::default();
        src.push("lib.rs", TreeNode::File);
        src.push("main.rs", TreeNode::File);
        let mut tree = FileTree::default();
        tree.push("Cargo.toml", TreeNode::File);
        tree.push("src", TreeNode::Dir(src));
        tree
    }

    #[test]
    fn leaf_paths_are_forward_slash_and_ordered() {
        assert_eq!(sample().leaf_paths(), vec!["Cargo.toml", "src/lib.rs", "src/main.rs"]);
        assert_eq!(sample().file_count(), 3);
    }

    #[test]
    fn serializes_files_as_null() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"Cargo.toml": null, "src": {"lib.rs": null, "main.rs": null}})
        );
    }
}
