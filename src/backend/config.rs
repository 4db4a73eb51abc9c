//! Runtime configuration.
//!
//! ## TOML Format (`tailwalk.toml`)
//!
//! ```toml
//! # Maximum nesting of non-tail calls before evaluation fails
//! max_call_depth = 1024
//! # Annotate tail positions when defining call targets
//! tail_calls = true
//! # Log level for the command line driver (error, warn, info, debug, trace)
//! log_level = "warn"
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backend::call::depth::{DEFAULT_MAX_CALL_DEPTH, MAX_CALL_DEPTH_LIMIT};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum nesting of non-tail calls per evaluation thread.
    /// Also sizes the native stack of the runtime's evaluation threads.
    pub max_call_depth: usize,

    /// Whether roots built by the driver get tail annotation
    pub tail_calls: bool,

    /// Log level used by the binary's subscriber
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            tail_calls: true,
            log_level: "warn".to_string(),
        }
    }
}

/// Error loading a configuration file
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config '{}': {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "invalid config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_call_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_call_depth must be at least 1".to_string(),
            ));
        }
        if self.max_call_depth > MAX_CALL_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_call_depth must be at most {}",
                MAX_CALL_DEPTH_LIMIT
            )));
        }
        Ok(())
    }
}
