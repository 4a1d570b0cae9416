// src/cli.rs

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Track watch targets and module dependencies of a build, and print which
/// cached modules go stale when files change.
#[derive(Debug, Clone, Parser)]
#[command(name = "watchgraph", version, long_about = None)]
pub struct CliArgs {
    /// Config file. Watch paths are relative to its directory.
    #[arg(long, short = 'c', value_name = "PATH", default_value = "Watchgraph.toml")]
    pub config: PathBuf,

    /// Register targets and discover dependencies, print them, then exit.
    #[arg(long, conflicts_with = "dry_run")]
    pub once: bool,

    /// Validate and print the config; nothing else is read.
    #[arg(long)]
    pub dry_run: bool,

    /// Scan modules as ESM even if the config says otherwise.
    #[arg(long)]
    pub esm: bool,

    /// Skip module dependency discovery even if the config enables it.
    #[arg(long = "no-deps", action = ArgAction::SetTrue)]
    pub no_deps: bool,

    /// Log level; overrides `WATCHGRAPH_LOG`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
