//! # EVRS Config
//!
//! Configuration types for the EVRS API, each loaded from environment
//! variables with development defaults:
//!
//! - [`jwt`]: token signing secret, lifetime and clock-skew leeway
//! - [`cookie`]: attributes of the `<role>_token` cookies
//! - [`cors`]: allowed frontend origins
//! - [`server`]: bind address, static frontend and log directories
//!
//! ```ignore
//! use evrs_config::{CookieConfig, CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt = JwtConfig::from_env();
//! let cookie = CookieConfig::from_env(&jwt);
//! ```

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod server;

pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

use std::env;
use std::str::FromStr;

/// Reads and parses `key`, falling back to `default` when unset or malformed.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads `key` as a string, treating blank values as unset.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_for_unset_key() {
        assert_eq!(env_or("EVRS_TEST_SURELY_UNSET_KEY", 42u16), 42);
    }

    #[test]
    fn test_env_opt_unset_is_none() {
        assert!(env_opt("EVRS_TEST_SURELY_UNSET_KEY").is_none());
    }
}
