//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request middleware produces:
//!     → logging.rs (one structured record per request)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
