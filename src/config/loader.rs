use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::CommandConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Placeholder path reported for configs parsed from a string.
const INLINE_SOURCE: &str = "<inline>";

impl CommandConfig {
    /// Loads configuration from a TOML file.
    ///
    /// - If the file doesn't exist, returns `CommandConfig::default()`.
    /// - Otherwise parses and validates it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No command config file, using defaults");
            return Ok(CommandConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new(INLINE_SOURCE))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: CommandConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The default description is not blank
    /// - No message text is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_description.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "default_description must not be empty".to_string(),
            });
        }

        for (field, text) in self.messages.entries() {
            if text.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("messages.{} must not be empty", field),
                });
            }
        }

        Ok(())
    }
}
