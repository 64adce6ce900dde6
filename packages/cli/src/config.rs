//! Optional TOML configuration for the intake robot.
//!
//! ```toml
//! min_confidence = 0.75
//! archive_dir = "archive"
//! sample_dir = "samples"
//! ```
//!
//! Every key is optional; command-line flags take precedence.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`IntakeConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// `min_confidence` is outside `[0, 1]`.
    #[error("min_confidence must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),
}

/// Settings shared by the CLI subcommands.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Fail `extract` when confidence falls below this value.
    pub min_confidence: Option<f64>,
    /// Default destination directory for `archive`.
    pub archive_dir: Option<PathBuf>,
    /// Default directory for `sample`.
    pub sample_dir: Option<PathBuf>,
}

impl IntakeConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed input or
    /// [`ConfigError::InvalidThreshold`] for an out-of-range threshold.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;

        if let Some(threshold) = config.min_confidence
            && !(0.0..=1.0).contains(&threshold)
        {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or any error
    /// from [`Self::parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}
