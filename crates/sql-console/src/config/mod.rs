//! Configuration loading and validation.
//!
//! Layers, lowest first: built-in defaults, an optional YAML file, the
//! process environment (after loading `.env`), then CLI overrides applied by
//! the caller.

mod types;
mod validation;

pub use types::*;

use std::path::Path;

use tracing::debug;

use crate::core::ConnectionDescriptor;
use crate::error::Result;

impl ConsoleConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ConsoleConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Overlay the process environment, loading `.env` from the working
    /// directory first. Variables already set in the environment win over
    /// `.env` entries.
    pub fn apply_env(&mut self) {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overlay values from `lookup`, keyed by environment variable name.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(ENV_DATABASE_URI) {
            self.database_uri = uri;
        }
        if let Some(file) = lookup(ENV_SQLITE_FILE).filter(|v| !v.is_empty()) {
            self.sqlite_file = file.into();
        }
        if let Some(schema) = lookup(ENV_POSTGRES_SCHEMA).filter(|v| !v.is_empty()) {
            self.postgres_schema = schema;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Parse the configured descriptor.
    pub fn descriptor(&self) -> Result<ConnectionDescriptor> {
        ConnectionDescriptor::parse(&self.database_uri, &self.sqlite_file)
    }
}
