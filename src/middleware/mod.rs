//! Request authentication and authorization.
//!
//! - [`auth`]: token verifiers (per role and generic) and the [`auth::AuthUser`] extractor
//! - [`role`]: the allowed-role guard
//! - [`gate`]: cookie-presence redirects for frontend pages
//!
//! A protected router gets the guard first and the verifier last, so the
//! verifier runs first and the guard sees populated claims:
//!
//! ```ignore
//! let router = init_citizen_router()
//!     .route_layer(middleware::from_fn_with_state(AllowedRoles::only(Role::Citizen), require_roles))
//!     .route_layer(middleware::from_fn_with_state(Verifier::for_role(keys, Role::Citizen), verify_token));
//! ```
//!
//! [`protect`] does exactly that.

pub mod auth;
pub mod gate;
pub mod role;

use std::sync::Arc;

use axum::{Router, middleware};

use evrs_auth::{Role, TokenKeys};

use crate::middleware::auth::{Verifier, verify_token};
use crate::middleware::role::{AllowedRoles, require_roles};

/// Puts `router` behind the per-role verifier for `role` and a guard allowing only `role`.
pub fn protect<S>(router: Router<S>, keys: Arc<TokenKeys>, role: Role) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .route_layer(middleware::from_fn_with_state(
            AllowedRoles::only(role),
            require_roles,
        ))
        .route_layer(middleware::from_fn_with_state(
            Verifier::for_role(keys, role),
            verify_token,
        ))
}
