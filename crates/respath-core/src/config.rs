use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level configuration for Respath
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespathConfig {
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Workspace-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Name of the workspace
    #[serde(default = "default_name")]
    pub name: String,
    /// Directory whose subdirectories are the projects
    pub root: PathBuf,
    /// Entry names hidden from the hierarchy (e.g. `.git`)
    #[serde(default = "default_ignore_names")]
    pub ignore_names: Vec<String>,
    /// Resolve against a one-time snapshot instead of the live directory
    #[serde(default)]
    pub snapshot: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn default_name() -> String {
    "Respath Workspace".to_string()
}

fn default_ignore_names() -> Vec<String> {
    vec![".git".to_string(), ".metadata".to_string()]
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for RespathConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig {
                name: default_name(),
                root: PathBuf::from("."),
                ignore_names: default_ignore_names(),
                snapshot: false,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl RespathConfig {
    /// Load config from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load config from a file. A relative `workspace.root` is taken relative
    /// to the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&content)?;

        if config.workspace.root.is_relative() {
            if let Some(dir) = path.parent() {
                config.workspace.root = dir.join(&config.workspace.root);
            }
        }

        debug!(
            "loaded config {} (workspace root {})",
            path.display(),
            config.workspace.root.display()
        );
        Ok(config)
    }
}
