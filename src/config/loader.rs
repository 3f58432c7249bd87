//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::install_root;
use crate::config::schema::CoinsConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Config file looked up at the install root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "zora-coins.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CoinsConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: CoinsConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Load the explicit config file, or the default file when present, or
/// fall back to built-in defaults.
pub fn load_or_default(explicit: Option<&Path>) -> Result<CoinsConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let default_path = install_root().join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return load_config(&default_path);
    }

    let config = CoinsConfig::default();
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
