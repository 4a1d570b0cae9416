#![allow(dead_code)]

use std::sync::Arc;

use watchgraph::config::{ConfigFile, ConfigSection, RawConfigFile, WatchSection};
use watchgraph::fs::mock::MockFileSystem;
use watchgraph::fs::FileSystem;
use watchgraph::targets::WatchTargets;

use crate::fake_resolver::FakeResolver;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                watch: WatchSection::default(),
            },
        }
    }

    pub fn target(mut self, path: &str) -> Self {
        self.config.watch.targets.push(path.to_string());
        self
    }

    pub fn glob(mut self, path: &str) -> Self {
        self.config.watch.globs.push(path.to_string());
        self
    }

    pub fn dependency_entry(mut self, path: &str) -> Self {
        self.config.watch.dependencies.push(path.to_string());
        self
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.config.watch.ignore.push(pattern.to_string());
        self
    }

    pub fn watch_javascript_dependencies(mut self, val: bool) -> Self {
        self.config.config.watch_javascript_dependencies = val;
        self
    }

    pub fn use_esm(mut self, val: bool) -> Self {
        self.config.config.use_esm = val;
        self
    }

    pub fn use_hash(mut self, val: bool) -> Self {
        self.config.config.use_hash = val;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A registry over an empty mock filesystem and the given resolver.
pub fn targets_with_resolver(resolver: FakeResolver) -> WatchTargets {
    targets_with(resolver, MockFileSystem::new())
}

/// A registry over `fs` and the given resolver.
pub fn targets_with(resolver: FakeResolver, fs: MockFileSystem) -> WatchTargets {
    let fs: Arc<dyn FileSystem> = Arc::new(fs);
    WatchTargets::new(Arc::new(resolver), fs)
}
