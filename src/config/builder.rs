//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile, RawConfig};
use crate::error::ConfigError;

use std::path::PathBuf;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    raw: RawConfig,
    state_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            raw: RawConfig::default(),
            state_dir: None,
        }
    }

    /// Load configuration from a file
    ///
    /// With an explicit path the file must load; without one the default
    /// locations are tried and an absent config falls back to defaults.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        self.raw = match path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::load_default()?.unwrap_or_default(),
        };
        Ok(self)
    }

    /// Override with CLI state directory
    pub fn with_state_dir(mut self, state_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = state_dir {
            self.state_dir = Some(dir);
        }
        self
    }

    /// Validate and build the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut config = self.raw.normalize()?;
        if let Some(dir) = self.state_dir {
            config.state_dir = dir;
        }
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_state_dir;

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert!(config.checks.is_empty());
        assert_eq!(config.state_dir, default_state_dir());
    }

    #[test]
    fn test_builder_state_dir_override() {
        let config = ConfigBuilder::new()
            .with_state_dir(Some(PathBuf::from("/tmp/alerter-events")))
            .build()
            .unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/tmp/alerter-events"));
    }

    #[test]
    fn test_builder_override_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\nstate_dir = \"/from/file\"\n").unwrap();

        let config = ConfigBuilder::new()
            .with_file(Some(path.to_str().unwrap()))
            .unwrap()
            .with_state_dir(Some(PathBuf::from("/from/cli")))
            .build()
            .unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_builder_missing_explicit_file_errors() {
        let result = ConfigBuilder::new().with_file(Some("/nonexistent/alerter.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
