//! Sleepy probe: a synthetic HTTP backend for load-balancer and latency testing.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────────┐
//!                      │                   SLEEPY PROBE                    │
//!                      │                                                   │
//!     Client Request   │  ┌──────────┐    ┌────────────┐    ┌───────────┐  │
//!     ─────────────────┼─▶│   net    │───▶│   http     │───▶│ handlers  │  │
//!                      │  │ plain +  │    │  router +  │    │ /health   │  │
//!                      │  │   TLS    │    │  logging   │    │/randomsleep│ │
//!                      │  └──────────┘    └────────────┘    │ acme files│  │
//!                      │                                    └─────┬─────┘  │
//!                      │                                          │        │
//!                      │                                    ┌─────▼─────┐  │
//!                      │                                    │   delay   │  │
//!                      │                                    │ [min,max) │  │
//!                      │                                    └───────────┘  │
//!                      │  ┌─────────────────────────────────────────────┐  │
//!                      │  │ config │ observability │ lifecycle          │  │
//!                      │  └─────────────────────────────────────────────┘  │
//!                      └───────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod delay;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
