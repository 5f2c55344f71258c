//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check sleep bounds, listen address shapes, referenced paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure apart from filesystem lookups:
//!   ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::schema::ServerConfig;
use crate::delay::InvalidRange;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    SleepRange(#[from] InvalidRange),

    #[error("{field}: {value:?} is not a [host]:port address")]
    Address { field: &'static str, value: String },

    #[error("listen and listen_https are both {0:?}")]
    SameAddress(String),

    #[error("http01: {0} is not a directory")]
    AcmeDirectory(PathBuf),

    #[error("metrics_listen: {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.sleep_range() {
        errors.push(e.into());
    }

    for (field, value) in [("listen", &config.listen), ("listen_https", &config.listen_https)] {
        if !is_host_port(value) {
            errors.push(ValidationError::Address {
                field,
                value: value.clone(),
            });
        }
    }

    if config.tls().is_some() && config.listen == config.listen_https {
        errors.push(ValidationError::SameAddress(config.listen.clone()));
    }

    if let Some(dir) = config.acme_dir() {
        if !dir.is_dir() {
            errors.push(ValidationError::AcmeDirectory(dir.to_path_buf()));
        }
    }

    if let Some(addr) = &config.metrics_listen {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::MetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `host:port`, `:port` or `[v6]:port`. The host itself is resolved at bind time.
fn is_host_port(value: &str) -> bool {
    match value.rsplit_once(':') {
        Some((host, port)) => {
            port.parse::<u16>().is_ok()
                && !host.contains(char::is_whitespace)
                && (!host.contains(':') || (host.starts_with('[') && host.ends_with(']')))
        }
        None => false,
    }
}
