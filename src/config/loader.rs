//! Configuration loading: TOML file first, command-line flags on top.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::cli::Args;
use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML configuration file. Missing keys take their defaults.
pub fn load_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the startup configuration from parsed flags.
///
/// Defaults, then the `--config` file if given, then every flag that was set
/// explicitly. The result is validated before it is returned.
pub fn load_config(args: &Args) -> Result<ServerConfig, ConfigError> {
    let base = match &args.config {
        Some(path) => load_file(path)?,
        None => ServerConfig::default(),
    };
    let config = args.apply(base);

    if config.tls().is_none() && (config.certificate.is_some() || config.key.is_some()) {
        tracing::warn!(
            certificate = ?config.certificate,
            key = ?config.key,
            "TLS needs both a certificate and a key; serving plain HTTP only"
        );
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
