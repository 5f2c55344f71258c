//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags (cli.rs)
//!     + optional TOML file (loader.rs)
//!     → merge: defaults ← file ← explicit flags
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc with the handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so an empty command line runs
//! - Durations use Go syntax ("250ms", "2.5s") in flags and files

pub mod cli;
pub mod duration;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Args;
pub use loader::{load_config, ConfigError};
pub use schema::{ServerConfig, TlsConfig};
pub use validation::ValidationError;
