use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::NormalizedPath;

/// Kind of a node in the workspace tree.
///
/// There is no "link" kind: hierarchies report the kind of a link's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Root,
    Project,
    Folder,
    File,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Root => "root",
            ResourceKind::Project => "project",
            ResourceKind::Folder => "folder",
            ResourceKind::File => "file",
        }
    }

    /// Root, projects and folders can hold children.
    pub fn is_container(self) -> bool {
        !matches!(self, ResourceKind::File)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The workspace location a resolved identifier designates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Root,
    Project(String),
    Folder(NormalizedPath),
    File(NormalizedPath),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Root => ResourceKind::Root,
            Resource::Project(_) => ResourceKind::Project,
            Resource::Folder(_) => ResourceKind::Folder,
            Resource::File(_) => ResourceKind::File,
        }
    }

    pub fn path(&self) -> NormalizedPath {
        match self {
            Resource::Root => NormalizedPath::root(),
            Resource::Project(name) => NormalizedPath::project(name),
            Resource::Folder(path) | Resource::File(path) => path.clone(),
        }
    }
}

/// Result of a resolution: a resource plus whether it exists right now.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceNode {
    pub resource: Resource,
    pub exists: bool,
}

impl ResourceNode {
    pub fn new(resource: Resource, exists: bool) -> Self {
        Self { resource, exists }
    }

    pub fn root() -> Self {
        Self::new(Resource::Root, true)
    }

    pub fn kind(&self) -> ResourceKind {
        self.resource.kind()
    }

    pub fn path(&self) -> NormalizedPath {
        self.resource.path()
    }

    /// Workspace-absolute path: `/` for the root, `/project/folder/file` otherwise.
    pub fn full_path(&self) -> String {
        self.path().to_string()
    }

    pub fn exists(&self) -> bool {
        self.exists
    }
}

impl fmt::Display for ResourceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.exists { "exists" } else { "missing" };
        write!(f, "{} {} {}", self.kind(), state, self.path())
    }
}
