// src/config/model.rs

use serde::Deserialize;

use crate::types::ModuleFormat;

/// Configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// watch_javascript_dependencies = true
/// use_esm = false
/// use_hash = false
///
/// [watch]
/// targets = ["./eleventy.config.js"]
/// globs = ["_includes", "_data"]
/// dependencies = ["./eleventy.config.js"]
/// ignore = ["node_modules/**"]
/// ```
///
/// All sections are optional and have reasonable defaults. Use
/// `ConfigFile::try_from` to obtain a validated [`ConfigFile`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Session-wide mode flags from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// What to watch, from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[config]` section.
///
/// These flags are read once, before the watch session starts.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Discover and watch the module dependencies of `watch.dependencies`.
    #[serde(default = "default_watch_javascript_dependencies")]
    pub watch_javascript_dependencies: bool,

    /// The project uses ESM `import` syntax rather than `require`.
    #[serde(default)]
    pub use_esm: bool,

    /// Drop change events whose file content hash did not change.
    #[serde(default)]
    pub use_hash: bool,
}

fn default_watch_javascript_dependencies() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            watch_javascript_dependencies: default_watch_javascript_dependencies(),
            use_esm: false,
            use_hash: false,
        }
    }
}

impl ConfigSection {
    pub fn module_format(&self) -> ModuleFormat {
        ModuleFormat::from_esm_flag(self.use_esm)
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WatchSection {
    /// Paths watched exactly as given.
    #[serde(default)]
    pub targets: Vec<String>,

    /// Paths expanded to recursive globs (a directory watches everything
    /// beneath it).
    #[serde(default)]
    pub globs: Vec<String>,

    /// Module entry files whose transitive local imports are discovered and
    /// watched as dependencies. The entries themselves are watched too.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Glob patterns; discovered dependencies matching any of these are not
    /// watched.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`),
/// so holders can rely on the invariants checked there.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config: ConfigSection,
    watch: WatchSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, watch: WatchSection) -> Self {
        Self { config, watch }
    }

    /// Apply `--esm` / `--no-deps`. Flags only ever switch a mode on or
    /// discovery off; absent flags keep the file's values.
    pub fn with_cli_overrides(mut self, esm: bool, no_deps: bool) -> Self {
        if esm {
            self.config.use_esm = true;
        }
        if no_deps {
            self.config.watch_javascript_dependencies = false;
        }
        self
    }

    pub fn config_section(&self) -> &ConfigSection {
        &self.config
    }

    pub fn watch_section(&self) -> &WatchSection {
        &self.watch
    }
}
