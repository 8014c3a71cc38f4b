//! # EVRS Auth
//!
//! Role-based authentication for the EVRS API.
//!
//! - [`role`]: the five account roles and their cookie names
//! - [`claims`]: the token payload `{ id, role, iat, exp }`
//! - [`keys`]: [`TokenKeys`], the process-wide signing material
//! - [`credentials`]: locating a token in cookies or the bearer header
//! - [`verify`]: per-role and generic verification, and the allowed-role guard
//! - [`error`]: [`AuthError`], the rejection every verifier produces
//!
//! Trust is stateless: a token is valid when its signature checks out and it
//! has not expired. Nothing is looked up in storage.
//!
//! ```ignore
//! use std::sync::Arc;
//! use evrs_auth::{Role, TokenKeys, verify_role};
//!
//! let keys = Arc::new(TokenKeys::from_config(&jwt_config));
//! let token = keys.issue(Role::Hcp, "HCP1234567890")?;
//! let claims = verify_role(&keys, &jar, Some(&token), Role::Hcp)?;
//! ```

pub mod claims;
pub mod credentials;
pub mod error;
pub mod keys;
pub mod role;
pub mod verify;

pub use claims::Claims;
pub use credentials::{CookieSource, bearer_token};
pub use error::AuthError;
pub use keys::TokenKeys;
pub use role::{Role, UnknownRole};
pub use verify::{authorize, verify_any, verify_role};
