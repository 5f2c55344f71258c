//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, plain + TLS listeners)
//!     → middleware/logging.rs (timing, one record per request)
//!     → handlers.rs (/health, /randomsleep, 404 fallback)
//!     → acme.rs (/.well-known/acme-challenge/*, optional)
//!     → Send to client
//! ```

pub mod acme;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{AppState, HttpServer, ServerError};
