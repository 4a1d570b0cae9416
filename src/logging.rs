// src/logging.rs

//! `tracing` subscriber setup for the `watchgraph` binary.
//!
//! `--log-level` wins. Otherwise `WATCHGRAPH_LOG` is read as an `EnvFilter`
//! directive string, so `WATCHGRAPH_LOG=watchgraph::resolve=trace,info` works.
//! Without either, `info`.
//!
//! Everything goes to stderr; stdout carries `invalidate <path>` lines only.

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "WATCHGRAPH_LOG";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::default().add_directive(LevelFilter::from_level(level.into()).into()),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .with_env_var(LOG_ENV_VAR)
            .from_env_lossy(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}
