// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod invalidate;
pub mod logging;
pub mod paths;
pub mod resolve;
pub mod targets;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::{Session, SessionEvent, SessionOptions};
use crate::fs::{FileSystem, RealFileSystem};
use crate::invalidate::LogNotifier;
use crate::targets::WatchTargets;
use crate::watch::PathMatcher;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the target registry and initial dependency discovery
/// - the file watcher
/// - the session loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone();
    let cfg = load_and_validate(&config_path)
        .with_context(|| format!("loading config {:?}", config_path))?
        .with_cli_overrides(args.esm, args.no_deps);

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let root = config_root_dir(&config_path);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::rooted(&root));

    let targets = prepare_targets(&cfg, Arc::clone(&fs)).await?;

    if args.once {
        print_targets(&targets);
        return Ok(());
    }

    let (tx, rx) = mpsc::channel::<SessionEvent>(64);

    let _watcher_handle = crate::watch::spawn_watcher(&root, tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SessionEvent::ShutdownRequested).await;
        });
    }

    let options = session_options(&cfg)?;
    let session = Session::new(targets, options, fs, LogNotifier, rx);
    session.run().await?;
    Ok(())
}

/// Build a registry from config: set the mode flags, register explicit and
/// glob targets, then discover the dependencies of the discovery entries.
///
/// A discovery failure here aborts startup; later failures during the
/// session are only logged.
pub async fn prepare_targets(cfg: &ConfigFile, fs: Arc<dyn FileSystem>) -> Result<WatchTargets> {
    let flags = cfg.config_section();
    let watch = cfg.watch_section();

    let mut targets = WatchTargets::with_import_scanner(fs);
    targets.set_watch_javascript_dependencies(flags.watch_javascript_dependencies);
    targets.set_module_format(flags.module_format());

    targets.add(&watch.targets);
    targets.add_glob_expanded(&watch.globs);
    targets.add(&watch.dependencies);

    let ignore = PathMatcher::build(&watch.ignore)?;
    let keep = |path: &str| !ignore.matches(path);
    targets
        .add_dependencies(&watch.dependencies, Some(&keep))
        .await
        .context("discovering module dependencies")?;

    info!(
        targets = targets.all_targets().len(),
        graph_nodes = targets.graph().len(),
        "watch targets registered"
    );
    Ok(targets)
}

/// Session options derived from config.
pub fn session_options(cfg: &ConfigFile) -> Result<SessionOptions> {
    Ok(SessionOptions {
        discovery_entries: cfg.watch_section().dependencies.clone(),
        ignore: PathMatcher::build(&cfg.watch_section().ignore)?,
        use_hash: cfg.config_section().use_hash,
    })
}

/// Figure out the project root that config paths are relative to.
///
/// - If the config path has a non-empty parent (e.g. "site/Watchgraph.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Watchgraph.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// `--once` output: every target, then each discovery entry's dependencies.
fn print_targets(targets: &WatchTargets) {
    let mut all = targets.all_targets();
    all.sort();

    println!("watchgraph targets ({}):", all.len());
    for path in &all {
        let tag = if targets.is_dependency(path) { " (dependency)" } else { "" };
        println!("  - {path}{tag}");
    }

    let mut parents: Vec<&str> = targets
        .graph()
        .nodes()
        .filter(|n| !targets.graph().direct_dependencies_of(n).is_empty())
        .collect();
    parents.sort();

    if !parents.is_empty() {
        println!();
        println!("dependency graph:");
        for parent in parents {
            let mut deps = targets.dependencies_of(parent);
            deps.sort();
            println!("  {parent}");
            for dep in deps {
                println!("    -> {dep}");
            }
        }
    }
}

/// Simple dry-run output: print the validated config.
fn print_dry_run(cfg: &ConfigFile) {
    let flags = cfg.config_section();
    let watch = cfg.watch_section();

    println!("watchgraph dry-run");
    println!(
        "  config.watch_javascript_dependencies = {}",
        flags.watch_javascript_dependencies
    );
    println!("  config.use_esm = {}", flags.use_esm);
    println!("  config.use_hash = {}", flags.use_hash);
    println!();

    println!("watch:");
    if !watch.targets.is_empty() {
        println!("  targets: {:?}", watch.targets);
    }
    if !watch.globs.is_empty() {
        println!("  globs: {:?}", watch.globs);
    }
    if !watch.dependencies.is_empty() {
        println!("  dependencies: {:?}", watch.dependencies);
    }
    if !watch.ignore.is_empty() {
        println!("  ignore: {:?}", watch.ignore);
    }

    debug!("dry-run complete (nothing watched)");
}
