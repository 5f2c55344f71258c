//! ACME HTTP-01 challenge files.
//!
//! Tokens dropped into the configured directory are served under
//! `/.well-known/acme-challenge/`. The prefix is stripped by the router before
//! `ServeDir` looks the name up, and `ServeDir` refuses `..` components.

use std::path::Path;

use tower_http::services::ServeDir;

/// URL prefix the challenge files are mounted at.
pub const CHALLENGE_PREFIX: &str = "/.well-known/acme-challenge";

/// Static file service rooted at `dir`.
pub fn challenge_service(dir: &Path) -> ServeDir {
    ServeDir::new(dir)
}
