//! Respath command line entry point

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, warn};
use respath_core::vfs::PhysicalFileSystem;
use respath_core::{
    DirectoryHierarchy, InMemoryHierarchy, ResourceIdentifier, ResourceKind, ResourceNode,
    ResourceResolver, RespathConfig, WorkspaceHierarchy,
};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "respath",
    about = "Resolve platform:/resource URIs against a workspace directory",
    version
)]
struct Cli {
    /// Workspace configuration file (YAML).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Workspace root directory; overrides the config file.
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Resolve against a snapshot taken at startup instead of the live directory.
    #[arg(long)]
    snapshot: bool,

    /// Print one JSON object per URI.
    #[arg(long)]
    json: bool,

    /// URIs to resolve, in order.
    #[arg(required = true, value_name = "URI")]
    uris: Vec<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    uri: &'a str,
    kind: Option<ResourceKind>,
    path: Option<String>,
    exists: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RespathConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RespathConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.workspace.root = root.clone();
    }
    config.workspace.snapshot |= cli.snapshot;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let resolver = ResourceResolver::new(open_hierarchy(&config)?);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for uri in &cli.uris {
        let identifier = ResourceIdentifier::parse(uri)
            .with_context(|| format!("cannot parse `{uri}`"))?;
        let node = resolver
            .resolve(&identifier)
            .with_context(|| format!("cannot resolve `{uri}`"))?;
        debug!("{uri} -> {node:?}");
        write_report(&mut out, uri, node.as_ref(), cli.json)?;
    }

    Ok(())
}

fn open_hierarchy(config: &RespathConfig) -> Result<Box<dyn WorkspaceHierarchy>> {
    let workspace = &config.workspace;
    debug!(
        "workspace `{}` at {} (snapshot: {})",
        workspace.name,
        workspace.root.display(),
        workspace.snapshot
    );

    if workspace.snapshot {
        let snapshot = InMemoryHierarchy::snapshot_directory(
            &workspace.root,
            Arc::new(PhysicalFileSystem),
            &workspace.ignore_names,
        )
        .with_context(|| format!("failed to snapshot {}", workspace.root.display()))?;
        return Ok(Box::new(snapshot));
    }

    if !workspace.root.is_dir() {
        warn!(
            "workspace root {} is not a directory; only the root will exist",
            workspace.root.display()
        );
    }
    Ok(Box::new(
        DirectoryHierarchy::new(workspace.root.clone())
            .with_ignore_names(workspace.ignore_names.clone()),
    ))
}

fn write_report(
    out: &mut impl Write,
    uri: &str,
    node: Option<&ResourceNode>,
    json: bool,
) -> Result<()> {
    if json {
        let report = Report {
            uri,
            kind: node.map(ResourceNode::kind),
            path: node.map(ResourceNode::full_path),
            exists: node.map(ResourceNode::exists),
        };
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
        return Ok(());
    }

    match node {
        Some(node) => writeln!(out, "{node}")?,
        None => writeln!(out, "not-applicable {uri}")?,
    }
    Ok(())
}
