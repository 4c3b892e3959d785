use std::sync::Arc;

use crate::model::ResourceKind;
use crate::path::NormalizedPath;

pub mod directory;
pub mod memory;

/// Read-only view of the workspace resource tree.
///
/// Lookups are exact-case. Links are resolved before a kind is reported, so
/// implementations never answer "link": a folder-link is a `Folder`, a
/// file-link is a `File`, and a link whose target is missing still exists.
pub trait WorkspaceHierarchy: Send + Sync {
    /// Kind of the node at `path`, or `None` when nothing is there.
    /// One call is one consistent observation of the tree.
    fn lookup(&self, path: &NormalizedPath) -> Option<ResourceKind>;

    fn exists(&self, path: &NormalizedPath) -> bool {
        self.lookup(path).is_some()
    }

    /// Only meaningful when [`WorkspaceHierarchy::exists`] holds.
    fn kind_of(&self, path: &NormalizedPath) -> Option<ResourceKind> {
        self.lookup(path)
    }
}

impl<H: WorkspaceHierarchy + ?Sized> WorkspaceHierarchy for &H {
    fn lookup(&self, path: &NormalizedPath) -> Option<ResourceKind> {
        (**self).lookup(path)
    }
}

impl<H: WorkspaceHierarchy + ?Sized> WorkspaceHierarchy for Box<H> {
    fn lookup(&self, path: &NormalizedPath) -> Option<ResourceKind> {
        (**self).lookup(path)
    }
}

impl<H: WorkspaceHierarchy + ?Sized> WorkspaceHierarchy for Arc<H> {
    fn lookup(&self, path: &NormalizedPath) -> Option<ResourceKind> {
        (**self).lookup(path)
    }
}
