//! ASCII rendering of a [`FileTree`].

use std::fmt::Write as _;

use super::{FileTree, TreeNode};

const TEE: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Renders `tree` as a nested listing with box-drawing connectors.
///
/// ```text
/// ├── Cargo.toml
/// └── src
///     └── main.rs
/// ```
#[must_use]
pub fn render_tree(tree: &FileTree) -> String {
    let mut out = String::new();
    render_level(tree, "", &mut out);
    out
}

fn render_level(tree: &FileTree, prefix: &str, out: &mut String) {
    let last = tree.len().saturating_sub(1);
    for (index, (name, node)) in tree.entries().iter().enumerate() {
        let is_last = index == last;
        let connector = if is_last { CORNER } else { TEE };
        let _ = writeln!(out, "{prefix}{connector}{name}");
        if let TreeNode::Dir(children) = node {
            let indent = if is_last { BLANK } else { PIPE };
            render_level(children, &format!("{prefix}{indent}"), out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_renders_nothing() {
        assert_eq!(render_tree(&FileTree::default()), "");
    }

    #[test]
    fn inner_directories_keep_the_pipe() {
        let mut docs = FileTree::default();
        docs.push("guide.md", TreeNode::File);
        let mut src = FileTree::default();
        src.push("a.rs", TreeNode::File);
        src.push("b.rs", TreeNode::File);
        let mut tree = FileTree::default();
        tree.push("docs", TreeNode::Dir(docs));
        tree.push("src", TreeNode::Dir(src));
        tree.push("README.md", TreeNode::File);

        let expected = "\
├── docs
│   └── guide.md
├── src
│   ├── a.rs
│   └── b.rs
└── README.md
";
        assert_eq!(render_tree(&tree), expected);
    }

    #[test]
    fn empty_directory_is_still_listed() {
        let mut tree = FileTree::default();
        tree.push("empty", TreeNode::Dir(FileTree::default()));
        assert_eq!(render_tree(&tree), "└── empty\n");
    }
}
