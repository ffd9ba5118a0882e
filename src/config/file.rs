//! Configuration file loading
//!
//! Handles loading configuration from TOML files.

use crate::config::RawConfig;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RawConfig, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: RawConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    ///
    /// A file that exists but fails to parse is an error, not a
    /// fallthrough to the next location.
    pub fn load_default() -> Result<Option<RawConfig>, ConfigError> {
        for path in Self::default_paths() {
            if path.exists() {
                let config = Self::load(&path)?;
                log::info!("Loaded config from {}", path.display());
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    /// Get default configuration file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/alerter/config.toml"));

        // User config
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("alerter/config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("alerter.toml"));
        paths.push(PathBuf::from(".alerter.toml"));

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_not_empty() {
        let paths = ConfigFile::default_paths();
        assert!(!paths.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_parses_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[checks]\ndb = []\n").unwrap();
        let raw = ConfigFile::load(&path).unwrap();
        assert!(raw.checks.contains_key("db"));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[checks\n").unwrap();
        let result = ConfigFile::load(&path);
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }
}
