//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up the request logging middleware
//! - Serve plain HTTP on the bound listener
//! - Serve HTTPS alongside it when TLS material is configured

use axum::{middleware, routing::any, Router};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServerConfig;
use crate::delay::{DelaySource, InvalidRange, SeededSource, SleepRange, ThreadRngSource};
use crate::http::{acme, handlers, middleware::log_request};
use crate::lifecycle::shutdown::recv as shutdown_signal;
use crate::net::listener::{self, ListenerError};
use crate::net::tls::{load_tls_config, TlsError};

/// Extra time in-flight HTTPS requests get on shutdown beyond the longest sleep.
const DRAIN_MARGIN: Duration = Duration::from_secs(1);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub range: SleepRange,
    pub delay: Arc<dyn DelaySource>,
}

/// Error type for serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    SleepRange(#[from] InvalidRange),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("TLS: {0}")]
    Tls(#[from] TlsError),

    #[error("{scheme} listener on {addr}: {source}")]
    Serve {
        scheme: &'static str,
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// HTTP server for the probe.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Delays come from a seeded generator when `seed` is set, otherwise from
    /// the thread-local RNG.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let delay: Arc<dyn DelaySource> = match config.seed {
            Some(seed) => Arc::new(SeededSource::new(seed)),
            None => Arc::new(ThreadRngSource),
        };
        Self::with_delay_source(config, delay)
    }

    /// Create a server drawing delays from `delay`.
    pub fn with_delay_source(
        config: ServerConfig,
        delay: Arc<dyn DelaySource>,
    ) -> Result<Self, ServerError> {
        let state = AppState {
            range: config.sleep_range()?,
            delay,
        };
        let router = build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// The fully wired router, e.g. for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server on `listener`, plus the HTTPS listener if configured.
    ///
    /// Returns when `shutdown` fires and both listeners have drained, or as
    /// soon as either listener fails.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let https = match self.config.tls() {
            Some(tls) => {
                let rustls = load_tls_config(&tls).await?;
                let addr = listener::resolve(&self.config.listen_https).await?;
                Some((addr, rustls))
            }
            None => None,
        };

        let plain = serve_plain(listener, self.router.clone(), shutdown.resubscribe());
        match https {
            None => plain.await,
            Some((addr, rustls)) => {
                let drain = drain_timeout(self.config.max);
                let secure = serve_tls(addr, rustls, self.router, shutdown, drain);
                tokio::try_join!(plain, secure).map(|_| ())
            }
        }
    }
}

/// How long in-flight HTTPS requests may run once shutdown starts.
fn drain_timeout(max: Duration) -> Duration {
    max.saturating_add(DRAIN_MARGIN)
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &ServerConfig, state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", any(handlers::health))
        .route("/randomsleep", any(handlers::random_sleep));

    if let Some(dir) = config.acme_dir() {
        router = router.nest_service(acme::CHALLENGE_PREFIX, acme::challenge_service(dir));
    }

    router
        .route_layer(middleware::from_fn(log_request))
        .fallback(handlers::not_found)
        .with_state(state)
}

async fn serve_plain(
    listener: TcpListener,
    router: Router,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), ServerError> {
    let addr = listener.local_addr().map_err(|source| ServerError::Serve {
        scheme: "http",
        addr: SocketAddr::from(([0, 0, 0, 0], 0)),
        source,
    })?;
    tracing::info!(address = %addr, "listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(|source| ServerError::Serve {
            scheme: "http",
            addr,
            source,
        })?;

    tracing::info!(address = %addr, "HTTP server stopped");
    Ok(())
}

async fn serve_tls(
    addr: SocketAddr,
    rustls: RustlsConfig,
    router: Router,
    shutdown: broadcast::Receiver<()>,
    drain: Duration,
) -> Result<(), ServerError> {
    let handle = axum_server::Handle::new();
    let signal = handle.clone();
    tokio::spawn(async move {
        shutdown_signal(shutdown).await;
        signal.graceful_shutdown(Some(drain));
    });

    tracing::info!(address = %addr, "listening on {}", addr);
    axum_server::bind_rustls(addr, rustls)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .map_err(|source| ServerError::Serve {
            scheme: "https",
            addr,
            source,
        })?;

    tracing::info!(address = %addr, "HTTPS server stopped");
    Ok(())
}
