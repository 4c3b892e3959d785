use crate::error::ResolveError;
use crate::hierarchy::WorkspaceHierarchy;
use crate::identifier::ResourceIdentifier;
use crate::model::{Resource, ResourceKind, ResourceNode};
use crate::path::NormalizedPath;

#[cfg(test)]
mod negative_tests;

/// Turns platform resource identifiers into workspace nodes.
///
/// Resolution is a pure function of the identifier and the hierarchy's current
/// state: no writes, no caching, no retries. Query and fragment are ignored.
pub struct ResourceResolver<H> {
    hierarchy: H,
}

impl<H: WorkspaceHierarchy> ResourceResolver<H> {
    pub fn new(hierarchy: H) -> Self {
        Self { hierarchy }
    }

    pub fn hierarchy(&self) -> &H {
        &self.hierarchy
    }

    /// Resolve `identifier` against the hierarchy.
    ///
    /// - `Ok(None)`: not a platform resource identifier.
    /// - zero segments: the root, which always exists.
    /// - one segment: a project, existing or not.
    /// - more: the kind the hierarchy reports, or a missing `File`.
    pub fn resolve(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<Option<ResourceNode>, ResolveError> {
        let platform = match identifier {
            ResourceIdentifier::PlatformResource(platform) => platform,
            ResourceIdentifier::PlatformPlugin(_) | ResourceIdentifier::Other(_) => {
                return Ok(None)
            }
        };

        let path = NormalizedPath::parse(&platform.path).map_err(|source| {
            ResolveError::MalformedIdentifier {
                identifier: identifier.to_string(),
                source,
            }
        })?;

        Ok(Some(self.resolve_path(path)))
    }

    /// Like [`ResourceResolver::resolve`], for callers whose identifier may be absent.
    pub fn resolve_opt(
        &self,
        identifier: Option<&ResourceIdentifier>,
    ) -> Result<Option<ResourceNode>, ResolveError> {
        let identifier = identifier.ok_or(ResolveError::NullIdentifier)?;
        self.resolve(identifier)
    }

    fn resolve_path(&self, path: NormalizedPath) -> ResourceNode {
        if path.is_root() {
            return ResourceNode::root();
        }

        let found = self.hierarchy.lookup(&path);

        if path.segment_count() == 1 {
            let name = path.segments()[0].clone();
            return ResourceNode::new(Resource::Project(name), found.is_some());
        }

        match found {
            Some(ResourceKind::File) => ResourceNode::new(Resource::File(path), true),
            // Anything else that holds children at depth > 1 is a folder.
            Some(_) => ResourceNode::new(Resource::Folder(path), true),
            None => ResourceNode::new(Resource::File(path), false),
        }
    }
}
