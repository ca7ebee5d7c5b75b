//! Recursive project walker built on the [`FileSystem`] port.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use futures::future::try_join_all;
use tracing::{debug, info};

use super::{join_relative, ContentIndex, ExclusionSet, FileTree, Scan, TreeNode};
use crate::ports::filesystem::{DirEntry, FileSystem};

type DirFuture<'a> = Pin<Box<dyn Future<Output = Result<DirScan, String>> + Send + 'a>>;

/// Contents of one scanned directory.
struct DirScan {
    tree: FileTree,
    files: Vec<(String, String)>,
}

/// One visited entry, tagged with everything its parent needs to merge it.
struct Visited {
    name: String,
    node: TreeNode,
    files: Vec<(String, String)>,
}

/// Walks a project root, skipping excluded entries and reading every file.
///
/// Entries of one directory are visited concurrently; results are merged in
/// listing order, so the output does not depend on completion order.
pub struct Scanner<'a> {
    fs: &'a dyn FileSystem,
    exclusions: &'a ExclusionSet,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `fs` with the given exclusion rules.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, exclusions: &'a ExclusionSet) -> Self {
        Self { fs, exclusions }
    }

    /// Scans `root` into a [`Scan`].
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be listed or any file cannot
    /// be read as UTF-8 text. No partial result is returned.
    pub async fn scan(&self, root: &Path) -> Result<Scan, String> {
        let DirScan { tree, files } = self.scan_dir(root.to_path_buf(), String::new()).await?;
        let contents: ContentIndex = files.into_iter().collect();
        info!(root = %root.display(), files = contents.len(), "scanned project");
        Ok(Scan { tree, contents })
    }

    fn scan_dir(&self, dir: PathBuf, relative: String) -> DirFuture<'_> {
        Box::pin(async move {
            let entries = self
                .fs
                .list_dir(&dir)
                .await
                .map_err(|e| format!("failed to list {}: {e}", dir.display()))?;
            debug!(dir = %dir.display(), entries = entries.len(), "scanning directory");

            let visits = entries
                .into_iter()
                .filter(|entry| {
                    let excluded = self.exclusions.is_excluded(&entry.name);
                    if excluded {
                        debug!(name = %entry.name, "excluded");
                    }
                    !excluded
                })
                .map(|entry| self.visit(&dir, &relative, entry));
            let visited = try_join_all(visits).await?;

            let mut tree = FileTree::default();
            let mut files = Vec::new();
            for entry in visited {
                tree.push(entry.name, entry.node);
                files.extend(entry.files);
            }
            Ok(DirScan { tree, files })
        })
    }

    async fn visit(&self, dir: &Path, relative: &str, entry: DirEntry) -> Result<Visited, String> {
        let path = dir.join(&entry.name);
        let child_relative = join_relative(relative, &entry.name);

        if entry.is_dir {
            let DirScan { tree, files } = self.scan_dir(path, child_relative).await?;
            return Ok(Visited { name: entry.name, node: TreeNode::Dir(tree), files });
        }

        let content = self
            .fs
            .read_to_string(&path)
            .await
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Ok(Visited { name: entry.name, node: TreeNode::File, files: vec![(child_relative, content)] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::scan::render_tree;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "package.json", "{}");
        write(dir.path(), "src/index.js", "console.log('hi');");
        write(dir.path(), "src/lib/util.js", "module.exports = {};");
        write(dir.path(), "node_modules/left-pad/index.js", "module.exports = 1;");
        write(dir.path(), ".git/HEAD", "ref: refs/heads/main");
        write(dir.path(), "debug.log", "noise");
        dir
    }

    #[tokio::test]
    async fn index_keys_match_tree_leaves() {
        let dir = project();
        let exclusions = ExclusionSet::default();
        let scan = Scanner::new(&LiveFileSystem, &exclusions).scan(dir.path()).await.unwrap();

        let leaves = scan.tree.leaf_paths();
        let keys: Vec<String> = scan.contents.keys().cloned().collect();
        let mut sorted_leaves = leaves.clone();
        sorted_leaves.sort();
        assert_eq!(sorted_leaves, keys);
        assert_eq!(leaves, vec!["package.json", "src/index.js", "src/lib/util.js"]);
        assert_eq!(scan.contents["src/lib/util.js"], "module.exports = {};");
    }

    #[tokio::test]
    async fn excluded_directories_are_pruned() {
        let dir = project();
        let exclusions = ExclusionSet::default();
        let scan = Scanner::new(&LiveFileSystem, &exclusions).scan(dir.path()).await.unwrap();

        assert!(scan.contents.keys().all(|k| !k.starts_with("node_modules")));
        assert!(scan.contents.keys().all(|k| !k.starts_with(".git")));
        assert!(!scan.contents.contains_key("debug.log"));
        assert!(scan.tree.entries().iter().all(|(name, _)| name != "node_modules"));
    }

    #[tokio::test]
    async fn scan_is_deterministic() {
        let dir = project();
        let exclusions = ExclusionSet::default();
        let scanner = Scanner::new(&LiveFileSystem, &exclusions);
        let first = scanner.scan(dir.path()).await.unwrap();
        let second = scanner.scan(dir.path()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            render_tree(&first.tree),
            "├── package.json\n└── src\n    ├── index.js\n    └── lib\n        └── util.js\n"
        );
    }

    #[tokio::test]
    async fn unreadable_file_aborts_scan() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "ok.txt", "fine");
        std::fs::write(dir.path().join("blob.bin"), [0xff_u8, 0xfe, 0x00, 0x81]).unwrap();
        let exclusions = ExclusionSet::default();
        let err = Scanner::new(&LiveFileSystem, &exclusions).scan(dir.path()).await.unwrap_err();
        assert!(err.contains("blob.bin"), "{err}");
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let exclusions = ExclusionSet::default();
        let result = Scanner::new(&LiveFileSystem, &exclusions)
            .scan(&dir.path().join("does-not-exist"))
            .await;
        assert!(result.is_err());
    }
}
