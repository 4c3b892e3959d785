//! Respath Core Library
//!
//! Converts platform resource identifiers (`platform:/resource/...`) into typed
//! workspace nodes: root, project, folder or file.
//! The resolver is pure logic; IO lives behind the hierarchy backends.
//!

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod identifier;
pub mod model;
pub mod path;
pub mod resolver;
pub mod vfs;

pub use config::{ConfigError, RespathConfig};
pub use error::{HierarchyError, IdentifierError, PathError, ResolveError};
pub use hierarchy::directory::DirectoryHierarchy;
pub use hierarchy::memory::{InMemoryHierarchy, LinkKind, LinkOptions, LinkTarget};
pub use hierarchy::WorkspaceHierarchy;
pub use identifier::{PlatformPath, ResourceIdentifier};
pub use model::{Resource, ResourceKind, ResourceNode};
pub use path::NormalizedPath;
pub use resolver::ResourceResolver;
