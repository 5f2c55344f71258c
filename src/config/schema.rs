//! Configuration schema definitions.
//!
//! `ServerConfig` is the single immutable settings structure built at
//! startup. It derives Serde traits so the same shape can be read from a TOML
//! file; durations use Go syntax (`"250ms"`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::duration;
use crate::delay::{InvalidRange, SleepRange};

/// Root configuration for the probe server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// `[host]:port` for plain HTTP (e.g. ":3000").
    pub listen: String,

    /// `[host]:port` for HTTPS. Only bound when TLS material is configured.
    pub listen_https: String,

    /// Lower bound of the `/randomsleep` delay (inclusive).
    #[serde(with = "duration::serde_str")]
    pub min: Duration,

    /// Upper bound of the `/randomsleep` delay (exclusive).
    #[serde(with = "duration::serde_str")]
    pub max: Duration,

    /// PEM certificate chain.
    pub certificate: Option<PathBuf>,

    /// PEM private key.
    pub key: Option<PathBuf>,

    /// Directory holding ACME HTTP-01 challenge tokens.
    pub http01: Option<PathBuf>,

    /// Seed for a reproducible delay sequence.
    pub seed: Option<u64>,

    /// Address for the Prometheus scrape endpoint.
    pub metrics_listen: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: ":3000".to_string(),
            listen_https: ":443".to_string(),
            min: Duration::from_millis(250),
            max: Duration::from_millis(2500),
            certificate: None,
            key: None,
            http01: None,
            seed: None,
            metrics_listen: None,
        }
    }
}

/// Certificate and key paths for the HTTPS listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl ServerConfig {
    /// TLS material, present only when both certificate and key are non-empty.
    pub fn tls(&self) -> Option<TlsConfig> {
        match (non_empty(&self.certificate), non_empty(&self.key)) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: cert.to_path_buf(),
                key_path: key.to_path_buf(),
            }),
            _ => None,
        }
    }

    /// ACME challenge directory, if configured.
    pub fn acme_dir(&self) -> Option<&Path> {
        non_empty(&self.http01)
    }

    pub fn sleep_range(&self) -> Result<SleepRange, InvalidRange> {
        SleepRange::new(self.min, self.max)
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}
