//! # EVRS Core
//!
//! Core types, errors, and utilities for the EVRS API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`ids`]: Prefixed public identifiers and one-time passwords
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use evrs_core::{AppError, generate_id, hash_password};
//!
//! let citizen_id = generate_id(evrs_core::ids::CITIZEN_PREFIX);
//! let hash = hash_password("secure_password")?;
//! let error = AppError::not_found(anyhow::anyhow!("Patient not found"));
//! ```

pub mod errors;
pub mod ids;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use ids::{generate_id, generate_password};
pub use password::{hash_password, verify_password};
