//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Metrics exporter → Bind listeners → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Listeners stop accepting → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, listeners last
//! - A failing listener is fatal; there is no restart

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
