//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Start the optional metrics exporter
//! - Bind the plain listener and hand over to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Logging is initialised by the caller before this runs, so every failure is logged

use std::net::SocketAddr;

use crate::config::{load_config, Args, ConfigError};
use crate::http::server::ServerError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::listener::{self, ListenerError};

/// Anything that stops the process from serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configure: {0}")]
    Config(#[from] ConfigError),

    #[error("metrics: {0}")]
    Metrics(String),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Run the probe until a shutdown signal arrives or a listener fails.
pub async fn run(args: &Args) -> Result<(), StartupError> {
    let config = load_config(args)?;

    tracing::info!(
        listen = %config.listen,
        min = ?config.min,
        max = ?config.max,
        tls = config.tls().is_some(),
        acme = config.acme_dir().is_some(),
        "Configuration loaded"
    );

    if let Some(addr) = &config.metrics_listen {
        // Validation has already checked the address shape.
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| StartupError::Metrics(e.to_string()))?;
        crate::observability::metrics::init_metrics(addr)
            .map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    let server = HttpServer::new(config)?;
    let listener = listener::bind(&server.config().listen).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn inverted_range_stops_before_binding() {
        let args = Args::parse_from(["sleepy-probe", "--min", "2s", "--max", "1s"]);
        let err = run(&args).await.unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
        assert!(err.to_string().starts_with("configure: "));
    }

    #[tokio::test]
    async fn taken_address_is_fatal() {
        let held = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let taken = held.local_addr().unwrap().to_string();

        let args = Args::parse_from(["sleepy-probe", "--listen", taken.as_str()]);
        let err = run(&args).await.unwrap_err();
        assert!(matches!(err, StartupError::Listener(ListenerError::Bind(_, _))));
    }
}
