//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listen / listen_https strings
//!     → listener.rs (":port" expansion, resolution, plain TCP bind)
//!     → tls.rs (PEM checks, rustls config for the HTTPS listener)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Any bind or certificate failure is returned to the caller, which treats it as fatal
//! - TLS is optional and enabled only when both certificate and key are set

pub mod listener;
pub mod tls;
