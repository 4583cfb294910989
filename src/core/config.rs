use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{DEFAULT_ENDPOINT, DEFAULT_SESSION_ID};

/// Startup configuration read from `config.toml` in the platform config
/// directory. Every key is optional; command-line flags take precedence
/// over config values, which take precedence over built-in defaults.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Base address of the weather agent service.
    pub endpoint: Option<String>,
    /// Session identifier sent with every request.
    pub session_id: Option<String>,
    /// Transcript log file to append exchanged messages to.
    pub log_file: Option<String>,
}

/// Errors that can occur when loading configuration from disk.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Read {
        /// Path to the configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as valid TOML.
    Parse {
        /// Path to the configuration file with invalid TOML.
        path: PathBuf,
        /// The TOML deserialization error.
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse config at {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Load the config from the platform config directory. A missing file
    /// is not an error and yields the defaults.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "permacommons", "wxchat")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Endpoint after applying the CLI override and the built-in default.
    pub fn resolve_endpoint(&self, cli_override: Option<String>) -> String {
        cli_override
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Session identifier after applying the CLI override and the built-in
    /// default. Fixed for the process lifetime once resolved.
    pub fn resolve_session_id(&self, cli_override: Option<String>) -> String {
        cli_override
            .or_else(|| self.session_id.clone())
            .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string())
    }

    /// Log file after applying the CLI override; logging stays disabled
    /// when neither names a file.
    pub fn resolve_log_file(&self, cli_override: Option<String>) -> Option<String> {
        cli_override.or_else(|| self.log_file.clone())
    }
}
