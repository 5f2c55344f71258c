//! Command-line flags.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};

use crate::config::duration;
use crate::config::schema::ServerConfig;
use crate::observability::logging::LogFormat;

/// Synthetic HTTP backend for load-balancer and latency testing.
#[derive(Parser, Debug, Clone)]
#[command(name = "sleepy-probe")]
#[command(version, long_about = None)]
pub struct Args {
    /// TOML file with server settings; flags given here take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// [IP address and] port to listen on for HTTP requests [default: :3000]
    #[arg(long)]
    pub listen: Option<String>,

    /// [IP address and] port to listen on for HTTPS requests [default: :443]
    #[arg(long)]
    pub listen_https: Option<String>,

    /// Minimum sleep time [default: 250ms]
    #[arg(long, value_parser = duration::parse)]
    pub min: Option<Duration>,

    /// Maximum sleep time [default: 2.5s]
    #[arg(long, value_parser = duration::parse)]
    pub max: Option<Duration>,

    /// Path to PEM-encoded certificate
    #[arg(long)]
    pub certificate: Option<PathBuf>,

    /// Path to PEM-encoded private key
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Path to directory containing ACME HTTP-01 challenge tokens
    #[arg(long)]
    pub http01: Option<PathBuf>,

    /// Seed the sleep generator for a reproducible delay sequence
    #[arg(long)]
    pub seed: Option<u64>,

    /// Address to expose Prometheus metrics on (e.g. 127.0.0.1:9090)
    #[arg(long)]
    pub metrics_listen: Option<String>,

    /// Log filter directive; falls back to RUST_LOG, then "info"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

impl Args {
    /// Parse the process arguments, accepting `-name` as well as `--name`.
    pub fn parse_flags() -> Self {
        Self::parse_from(normalize_flags(std::env::args_os()))
    }

    /// Overlay every explicitly given flag onto `config`.
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(listen) = &self.listen {
            config.listen = listen.clone();
        }
        if let Some(listen_https) = &self.listen_https {
            config.listen_https = listen_https.clone();
        }
        if let Some(min) = self.min {
            config.min = min;
        }
        if let Some(max) = self.max {
            config.max = max;
        }
        if self.certificate.is_some() {
            config.certificate = self.certificate.clone();
        }
        if self.key.is_some() {
            config.key = self.key.clone();
        }
        if self.http01.is_some() {
            config.http01 = self.http01.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.metrics_listen.is_some() {
            config.metrics_listen = self.metrics_listen.clone();
        }
        config
    }
}

/// Rewrite single-dash long flags (`-min=0`, `-listen :80`) to `--` form.
///
/// Only names of declared long flags are touched, so short flags and values
/// such as `-0` pass through. Everything after a bare `--` is left alone.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Args::command();
    let long_names: Vec<&str> = command
        .get_arguments()
        .filter_map(|arg| arg.get_long())
        .collect();

    let mut past_terminator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if past_terminator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                past_terminator = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if long_names.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
