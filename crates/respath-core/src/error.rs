use std::path::PathBuf;

use thiserror::Error;

use crate::model::ResourceKind;
use crate::path::NormalizedPath;

/// Errors surfaced by [`crate::ResourceResolver`].
///
/// "Not applicable" is not an error: it is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("malformed resource identifier `{identifier}`: {source}")]
    MalformedIdentifier {
        identifier: String,
        #[source]
        source: PathError,
    },
    #[error("resource identifier is absent")]
    NullIdentifier,
}

/// A path payload that cannot be turned into a [`NormalizedPath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("reserved segment `{0}`")]
    ReservedSegment(String),
    #[error("segment contains a NUL character")]
    NulCharacter,
    #[error("segment `{0}` contains a path separator")]
    SeparatorInSegment(String),
    #[error("empty segment")]
    EmptySegment,
}

/// Failures turning URI text into a [`crate::ResourceIdentifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("invalid URI `{text}`: {source}")]
    Invalid {
        text: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid percent-encoding in `{text}`")]
    InvalidEncoding { text: String },
}

/// Mutation failures of [`crate::InMemoryHierarchy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("`{0}` already exists")]
    AlreadyExists(NormalizedPath),
    #[error("parent of `{0}` does not exist")]
    ParentMissing(NormalizedPath),
    #[error("`{path}` has {actual} segments, expected {expected}")]
    InvalidDepth {
        path: NormalizedPath,
        expected: &'static str,
        actual: usize,
    },
    #[error("`{0}` does not exist")]
    NotFound(NormalizedPath),
    #[error("link target `{0}` does not exist")]
    LinkTargetMissing(String),
    #[error("link target `{target}` is a {actual}, link declared as {declared}")]
    LinkKindMismatch {
        target: String,
        declared: ResourceKind,
        actual: ResourceKind,
    },
    #[error("invalid workspace path: {0}")]
    InvalidPath(#[from] PathError),
    #[error("cannot read workspace directory `{0}`")]
    UnreadableRoot(PathBuf),
}
