use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a filesystem entry is once links are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

/// Abstract interface for file system operations.
pub trait FileSystem: Send + Sync {
    /// Kind of the entry at `path`, following symbolic links.
    /// `None` when nothing is there or the link is dangling.
    fn entry_kind(&self, path: &Path) -> Option<EntryKind>;

    /// Whether `path` itself is a symbolic link, whatever it points at.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Exact names of the direct children of `dir`. Empty when unreadable.
    fn child_names(&self, dir: &Path) -> Vec<String>;

    /// All entries under `root` with their kinds.
    /// This should be a recursive search that follows links; `root` itself is excluded.
    fn walk(&self, root: &Path) -> Vec<(PathBuf, EntryKind)>;
}

/// Standard implementation of FileSystem using std::fs and walkdir.
pub struct PhysicalFileSystem;

impl FileSystem for PhysicalFileSystem {
    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        let metadata = std::fs::metadata(path).ok()?;
        if metadata.is_dir() {
            Some(EntryKind::Directory)
        } else {
            Some(EntryKind::File)
        }
    }

    fn is_symlink(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn child_names(&self, dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect()
    }

    fn walk(&self, root: &Path) -> Vec<(PathBuf, EntryKind)> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push((entry.path().to_path_buf(), kind));
        }

        entries
    }
}
