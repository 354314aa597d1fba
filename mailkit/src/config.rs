//! RON configuration for the `mailkit` binary.
//!
//! ```ron
//! (
//!     limits: (subject: 120),
//!     recipients: ["support@example.com"],
//!     cc: ["archive@example.com"],
//! )
//! ```

use std::path::{Path, PathBuf};

use mailkit_common::MailtoLimits;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MAILKIT_CONFIG";

/// Searched in order when [`CONFIG_ENV`] is not set.
pub const DEFAULT_PATHS: [&str; 2] = ["./mailkit.config.ron", "/etc/mailkit/mailkit.config.ron"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("MAILKIT_CONFIG points to non-existent file: {}", .0.display())]
    MissingFile(PathBuf),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: MailtoLimits,

    /// Recipients used when none are given on the command line.
    #[serde(default)]
    pub recipients: Vec<String>,

    /// Carbon copies used when none are given on the command line.
    #[serde(default)]
    pub cc: Vec<String>,
}

impl Config {
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `content` is not a valid config.
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Loads the first config found by [`locate`], or the defaults if there
    /// is none.
    ///
    /// # Errors
    ///
    /// Returns an error if a located file cannot be read or parsed.
    pub fn discover() -> Result<Self, ConfigError> {
        match locate(std::env::var_os(CONFIG_ENV).map(PathBuf::from))? {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Finds the config file using the following precedence:
/// 1. `explicit` (the value of [`CONFIG_ENV`]), which must exist
/// 2. ./mailkit.config.ron (current working directory)
/// 3. /etc/mailkit/mailkit.config.ron (system-wide config)
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if `explicit` does not exist.
pub fn locate(explicit: Option<PathBuf>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::MissingFile(path));
    }

    Ok(DEFAULT_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists()))
}
