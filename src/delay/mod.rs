//! Randomised sleep durations.
//!
//! # Data Flow
//! ```text
//! ServerConfig (min, max)
//!     → range.rs (validated half-open interval [min, max))
//!     → source.rs (random source draws one delay per request)
//!     → /randomsleep handler parks its task for that long
//! ```
//!
//! # Design Decisions
//! - The random source is a trait object so tests can pin the sequence
//! - Sampling works in whole nanoseconds to stay uniform over the interval
//! - An empty interval (min == max) always yields min

pub mod range;
pub mod source;

pub use range::{InvalidRange, SleepRange};
pub use source::{DelaySource, SeededSource, ThreadRngSource};
