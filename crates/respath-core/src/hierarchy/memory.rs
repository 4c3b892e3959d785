use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use super::WorkspaceHierarchy;
use crate::error::HierarchyError;
use crate::model::ResourceKind;
use crate::path::NormalizedPath;
use crate::vfs::{EntryKind, FileSystem, PhysicalFileSystem};

/// Declared kind of a linked resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Folder,
    File,
}

impl LinkKind {
    pub fn resource_kind(self) -> ResourceKind {
        match self {
            LinkKind::Folder => ResourceKind::Folder,
            LinkKind::File => ResourceKind::File,
        }
    }
}

/// Where a linked resource redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Workspace(NormalizedPath),
    External(PathBuf),
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::Workspace(path) => write!(f, "{path}"),
            LinkTarget::External(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Accept a target that does not exist (yet).
    pub allow_missing: bool,
}

impl LinkOptions {
    pub fn allow_missing() -> Self {
        Self {
            allow_missing: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Project,
    Folder,
    File,
    Link { kind: LinkKind, target: LinkTarget },
}

impl Node {
    fn kind(&self) -> ResourceKind {
        match self {
            Node::Project => ResourceKind::Project,
            Node::Folder => ResourceKind::Folder,
            Node::File => ResourceKind::File,
            Node::Link { kind, .. } => kind.resource_kind(),
        }
    }
}

/// In memory workspace tree.
///
/// Structural changes go through `&mut self`; share it behind a lock or an
/// `Arc` once populated.
pub struct InMemoryHierarchy {
    nodes: BTreeMap<NormalizedPath, Node>,
    fs: Arc<dyn FileSystem>,
}

impl InMemoryHierarchy {
    pub fn new() -> Self {
        Self::with_file_system(Arc::new(PhysicalFileSystem))
    }

    /// `fs` is consulted for external link targets.
    pub fn with_file_system(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            nodes: BTreeMap::new(),
            fs,
        }
    }

    pub fn create_project(&mut self, name: &str) -> Result<NormalizedPath, HierarchyError> {
        let path = NormalizedPath::from_segments([name])?;
        if self.nodes.contains_key(&path) {
            return Err(HierarchyError::AlreadyExists(path));
        }
        self.nodes.insert(path.clone(), Node::Project);
        Ok(path)
    }

    pub fn create_folder(&mut self, path: &NormalizedPath) -> Result<(), HierarchyError> {
        self.check_member_slot(path)?;
        self.nodes.insert(path.clone(), Node::Folder);
        Ok(())
    }

    pub fn create_file(&mut self, path: &NormalizedPath) -> Result<(), HierarchyError> {
        self.check_member_slot(path)?;
        self.nodes.insert(path.clone(), Node::File);
        Ok(())
    }

    /// Create a linked folder or file at `path`.
    ///
    /// An existing target must match `kind`. A missing target is rejected unless
    /// `options.allow_missing` is set; the link itself exists either way.
    pub fn create_link(
        &mut self,
        path: &NormalizedPath,
        kind: LinkKind,
        target: LinkTarget,
        options: LinkOptions,
    ) -> Result<(), HierarchyError> {
        self.check_member_slot(path)?;

        match self.target_kind(&target) {
            Some(actual) if actual.is_container() != (kind == LinkKind::Folder) => {
                return Err(HierarchyError::LinkKindMismatch {
                    target: target.to_string(),
                    declared: kind.resource_kind(),
                    actual,
                });
            }
            Some(_) => {}
            None if options.allow_missing => {
                debug!("linking {path} to missing target {target}");
            }
            None => return Err(HierarchyError::LinkTargetMissing(target.to_string())),
        }

        self.nodes
            .insert(path.clone(), Node::Link { kind, target });
        Ok(())
    }

    /// Remove `path` and everything beneath it.
    pub fn remove(&mut self, path: &NormalizedPath) -> Result<(), HierarchyError> {
        if !self.nodes.contains_key(path) {
            return Err(HierarchyError::NotFound(path.clone()));
        }
        self.nodes.retain(|candidate, _| !candidate.starts_with(path));
        Ok(())
    }

    /// Link target of the node at `path`, if it is a link.
    pub fn link_target(&self, path: &NormalizedPath) -> Option<&LinkTarget> {
        match self.nodes.get(path)? {
            Node::Link { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|(_, node)| matches!(node, Node::Project))
            .filter_map(|(path, _)| path.project_name())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build a tree from a directory: top-level directories become projects,
    /// everything below them folders and files. Links on disk are followed.
    pub fn snapshot_directory(
        root: &Path,
        fs: Arc<dyn FileSystem>,
        ignore_names: &[String],
    ) -> Result<Self, HierarchyError> {
        if fs.entry_kind(root) != Some(EntryKind::Directory) {
            return Err(HierarchyError::UnreadableRoot(root.to_path_buf()));
        }

        let mut hierarchy = Self::with_file_system(fs.clone());
        for (entry, kind) in fs.walk(root) {
            let Ok(relative) = entry.strip_prefix(root) else {
                continue;
            };

            let mut segments = Vec::new();
            for component in relative.components() {
                match component.as_os_str().to_str() {
                    Some(segment) => segments.push(segment.to_string()),
                    None => break,
                }
            }
            if segments.len() != relative.components().count() {
                warn!("skipping non UTF-8 entry {}", entry.display());
                continue;
            }
            if segments.iter().any(|s| ignore_names.contains(s)) {
                continue;
            }

            let path = match NormalizedPath::from_segments(segments) {
                Ok(path) => path,
                Err(err) => {
                    warn!("skipping {}: {err}", entry.display());
                    continue;
                }
            };

            let node = match (path.segment_count(), kind) {
                (1, EntryKind::Directory) => Node::Project,
                (1, EntryKind::File) => {
                    debug!("ignoring file {} at workspace root", entry.display());
                    continue;
                }
                (_, EntryKind::Directory) => Node::Folder,
                (_, EntryKind::File) => Node::File,
            };

            // Walk order is parent first, so a missing parent means it was skipped.
            let parent_present = path
                .parent()
                .map_or(true, |parent| parent.is_root() || hierarchy.nodes.contains_key(&parent));
            if parent_present {
                hierarchy.nodes.insert(path, node);
            }
        }

        debug!(
            "snapshot of {} holds {} resources",
            root.display(),
            hierarchy.len()
        );
        Ok(hierarchy)
    }

    fn check_member_slot(&self, path: &NormalizedPath) -> Result<(), HierarchyError> {
        if path.segment_count() < 2 {
            return Err(HierarchyError::InvalidDepth {
                path: path.clone(),
                expected: "at least 2",
                actual: path.segment_count(),
            });
        }
        if self.nodes.contains_key(path) {
            return Err(HierarchyError::AlreadyExists(path.clone()));
        }
        let parent_is_container = path
            .parent()
            .and_then(|parent| self.lookup(&parent))
            .is_some_and(ResourceKind::is_container);
        if !parent_is_container {
            return Err(HierarchyError::ParentMissing(path.clone()));
        }
        Ok(())
    }

    fn target_kind(&self, target: &LinkTarget) -> Option<ResourceKind> {
        match target {
            LinkTarget::Workspace(path) => self.lookup(path),
            LinkTarget::External(path) => match self.fs.entry_kind(path)? {
                EntryKind::Directory => Some(ResourceKind::Folder),
                EntryKind::File => Some(ResourceKind::File),
            },
        }
    }
}

impl Default for InMemoryHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceHierarchy for InMemoryHierarchy {
    fn lookup(&self, path: &NormalizedPath) -> Option<ResourceKind> {
        if path.is_root() {
            return Some(ResourceKind::Root);
        }
        self.nodes.get(path).map(Node::kind)
    }
}
