// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, WatchgraphError};
use crate::watch::PathMatcher;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::WatchgraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.watch))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_targets(cfg)?;
    validate_entries(cfg)?;
    validate_ignore_patterns(cfg)?;
    Ok(())
}

fn ensure_has_targets(cfg: &RawConfigFile) -> Result<()> {
    let w = &cfg.watch;
    if w.targets.is_empty() && w.globs.is_empty() && w.dependencies.is_empty() {
        return Err(WatchgraphError::ConfigError(
            "[watch] must list at least one entry in `targets`, `globs` or `dependencies`"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_entries(cfg: &RawConfigFile) -> Result<()> {
    let all = cfg
        .watch
        .targets
        .iter()
        .chain(cfg.watch.globs.iter())
        .chain(cfg.watch.dependencies.iter());
    for entry in all {
        if entry.trim().is_empty() {
            return Err(WatchgraphError::ConfigError(
                "[watch] entries must not be empty strings".to_string(),
            ));
        }
    }

    // Dependency discovery reads real files; a pattern cannot be scanned.
    for entry in cfg.watch.dependencies.iter() {
        if looks_like_glob(entry) {
            return Err(WatchgraphError::ConfigError(format!(
                "[watch].dependencies entry '{}' is a glob; list module files explicitly",
                entry
            )));
        }
    }
    Ok(())
}

fn validate_ignore_patterns(cfg: &RawConfigFile) -> Result<()> {
    PathMatcher::build(&cfg.watch.ignore)?;
    Ok(())
}

fn looks_like_glob(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}
