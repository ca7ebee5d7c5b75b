//! Live filesystem adapter using `tokio::fs`.

use std::path::Path;

use crate::ports::filesystem::{DirEntry, FileSystem, FsFuture};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string<'a>(&'a self, path: &'a Path) -> FsFuture<'a, String> {
        Box::pin(async move { Ok(tokio::fs::read_to_string(path).await?) })
    }

    fn write<'a>(&'a self, path: &'a Path, contents: &'a str) -> FsFuture<'a, ()> {
        Box::pin(async move {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            Ok(tokio::fs::write(path, contents).await?)
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Entries sorted by name. Symbolic links and names that are not valid
    /// UTF-8 are skipped.
    fn list_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, Vec<DirEntry>> {
        Box::pin(async move {
            let mut entries = Vec::new();
            let mut dir = tokio::fs::read_dir(path).await?;
            while let Some(entry) = dir.next_entry().await? {
                let file_type = entry.file_type().await?;
                if file_type.is_symlink() {
                    continue;
                }
                let Ok(name) = entry.file_name().into_string() else {
                    continue;
                };
                entries.push(DirEntry { name, is_dir: file_type.is_dir() });
            }
            entries.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(entries)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn listing_is_sorted_and_typed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("c.txt"), "c").unwrap();

        let entries = LiveFileSystem.list_dir(dir.path()).await.unwrap();
        assert_eq!(entries, vec![DirEntry::dir("a"), DirEntry::file("b.txt"), DirEntry::file("c.txt")]);
    }

    #[tokio::test]
    async fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/README.md");
        LiveFileSystem.write(&path, "# hi\n").await.unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&path).await.unwrap(), "# hi\n");
        assert!(LiveFileSystem.exists(&path));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinks_are_not_listed() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
        let entries = LiveFileSystem.list_dir(dir.path()).await.unwrap();
        assert_eq!(entries, vec![DirEntry::dir("real")]);
    }
}
