//! Runner configuration.

use std::path::{Path, PathBuf};

/// Options for a migration session.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the TOML configuration file.
    config_path: PathBuf,
    /// Whether tasks that already exist are left untouched.
    skip_existing: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a session.
    pub fn new(config_path: PathBuf, skip_existing: bool) -> Self {
        Self {
            config_path,
            skip_existing,
        }
    }

    /// Returns the configuration file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns whether existing tasks are skipped.
    pub fn skip_existing(&self) -> bool {
        self.skip_existing
    }
}
