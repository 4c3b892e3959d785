use std::path::PathBuf;
use std::sync::Arc;

use log::trace;

use super::WorkspaceHierarchy;
use crate::model::ResourceKind;
use crate::path::NormalizedPath;
use crate::vfs::{EntryKind, FileSystem, PhysicalFileSystem};

/// Live hierarchy over a directory on disk.
///
/// Direct subdirectories of `root` are projects. Every segment is matched
/// against the exact names listed by its parent, so a case-insensitive
/// filesystem still answers case-sensitively. Symbolic links report the kind of
/// their target; a dangling link exists and reports `File`.
pub struct DirectoryHierarchy {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    ignore_names: Vec<String>,
}

impl DirectoryHierarchy {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_file_system(root, Arc::new(PhysicalFileSystem))
    }

    pub fn with_file_system(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
            ignore_names: Vec::new(),
        }
    }

    /// Entries with one of these names (at any depth) are invisible.
    pub fn with_ignore_names(mut self, names: Vec<String>) -> Self {
        self.ignore_names = names;
        self
    }

    fn locate(&self, path: &NormalizedPath) -> Option<PathBuf> {
        let mut current = self.root.clone();
        for segment in path.segments() {
            if self.ignore_names.contains(segment) {
                return None;
            }
            if !self.fs.child_names(&current).contains(segment) {
                return None;
            }
            current.push(segment);
        }
        Some(current)
    }
}

impl WorkspaceHierarchy for DirectoryHierarchy {
    fn lookup(&self, path: &NormalizedPath) -> Option<ResourceKind> {
        if path.is_root() {
            return Some(ResourceKind::Root);
        }

        let location = self.locate(path)?;
        let kind = match (path.segment_count(), self.fs.entry_kind(&location)) {
            (1, Some(EntryKind::Directory)) => Some(ResourceKind::Project),
            (1, _) => None,
            (_, Some(EntryKind::Directory)) => Some(ResourceKind::Folder),
            (_, Some(EntryKind::File)) => Some(ResourceKind::File),
            (_, None) if self.fs.is_symlink(&location) => Some(ResourceKind::File),
            (_, None) => None,
        };
        trace!("lookup {path} at {} -> {kind:?}", location.display());
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn path(text: &str) -> NormalizedPath {
        NormalizedPath::parse(text).unwrap()
    }

    fn create_test_workspace() -> (DirectoryHierarchy, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("myProject/myFolder")).unwrap();
        fs::write(temp_dir.path().join("myProject/myFile.ext"), "").unwrap();
        fs::write(temp_dir.path().join("stray.txt"), "").unwrap();
        let hierarchy = DirectoryHierarchy::new(temp_dir.path());
        (hierarchy, temp_dir)
    }

    #[test]
    fn test_lookup_existing() {
        let (hierarchy, _temp_dir) = create_test_workspace();

        assert_eq!(hierarchy.lookup(&NormalizedPath::root()), Some(ResourceKind::Root));
        assert_eq!(hierarchy.lookup(&path("/myProject")), Some(ResourceKind::Project));
        assert_eq!(
            hierarchy.lookup(&path("/myProject/myFolder")),
            Some(ResourceKind::Folder)
        );
        assert_eq!(
            hierarchy.lookup(&path("/myProject/myFile.ext")),
            Some(ResourceKind::File)
        );
    }

    #[test]
    fn test_lookup_missing() {
        let (hierarchy, _temp_dir) = create_test_workspace();

        assert_eq!(hierarchy.lookup(&path("/otherProject")), None);
        assert_eq!(hierarchy.lookup(&path("/myProject/nothing")), None);
        assert_eq!(hierarchy.lookup(&path("/myProject/myFile.ext/child")), None);
        assert_eq!(hierarchy.lookup(&path("/stray.txt")), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let (hierarchy, _temp_dir) = create_test_workspace();

        assert_eq!(hierarchy.lookup(&path("/myProject/MYfILE.ext")), None);
        assert_eq!(hierarchy.lookup(&path("/MYPROJECT")), None);
    }

    #[test]
    fn test_ignore_names() {
        let (hierarchy, temp_dir) = create_test_workspace();
        fs::create_dir(temp_dir.path().join("myProject/.git")).unwrap();
        assert!(hierarchy.exists(&path("/myProject/.git")));

        let hierarchy = hierarchy.with_ignore_names(vec![".git".to_string()]);
        assert!(!hierarchy.exists(&path("/myProject/.git")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_report_target_kind() {
        use std::os::unix::fs::symlink;

        let (hierarchy, temp_dir) = create_test_workspace();
        let project = temp_dir.path().join("myProject");
        symlink(project.join("myFolder"), project.join("folderLink")).unwrap();
        symlink(project.join("myFile.ext"), project.join("fileLink")).unwrap();
        symlink(project.join("gone"), project.join("danglingLink")).unwrap();

        assert_eq!(
            hierarchy.lookup(&path("/myProject/folderLink")),
            Some(ResourceKind::Folder)
        );
        assert_eq!(
            hierarchy.lookup(&path("/myProject/fileLink")),
            Some(ResourceKind::File)
        );
        assert_eq!(
            hierarchy.lookup(&path("/myProject/danglingLink")),
            Some(ResourceKind::File)
        );
    }
}
