//! Listen address handling and TCP binding.
//!
//! # Responsibilities
//! - Accept Go-style `:port` addresses (all IPv4 interfaces)
//! - Resolve host names to a socket address
//! - Bind the plain HTTP listener

use std::net::SocketAddr;
use tokio::net::{lookup_host, TcpListener};

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Address did not resolve to anything usable.
    Resolve(String, std::io::Error),
    /// Failed to bind to address.
    Bind(SocketAddr, std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Resolve(addr, e) => write!(f, "Failed to resolve {}: {}", addr, e),
            ListenerError::Bind(addr, e) => write!(f, "Failed to bind {}: {}", addr, e),
        }
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListenerError::Resolve(_, e) | ListenerError::Bind(_, e) => Some(e),
        }
    }
}

/// Expand a bare `:port` to the IPv4 wildcard address.
pub fn normalize_address(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    }
}

/// Resolve a `[host]:port` string to the first matching socket address.
pub async fn resolve(addr: &str) -> Result<SocketAddr, ListenerError> {
    let normalized = normalize_address(addr);
    let mut candidates = lookup_host(normalized.as_str())
        .await
        .map_err(|e| ListenerError::Resolve(addr.to_string(), e))?;
    candidates.next().ok_or_else(|| {
        ListenerError::Resolve(
            addr.to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"),
        )
    })
}

/// Resolve and bind a plain TCP listener.
pub async fn bind(addr: &str) -> Result<TcpListener, ListenerError> {
    let socket_addr = resolve(addr).await?;
    TcpListener::bind(socket_addr)
        .await
        .map_err(|e| ListenerError::Bind(socket_addr, e))
}
