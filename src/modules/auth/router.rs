use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use evrs_auth::{Role, TokenKeys};

use super::controller::{login, logout, session};
use crate::middleware::auth::{Verifier, verify_token};
use crate::state::AppState;

/// `/login/{role}` and `/logout/{role}` are open. Each `/get/{role}` sits
/// behind the verifier for that role only.
pub fn init_auth_router(keys: Arc<TokenKeys>) -> Router<AppState> {
    let sessions = Role::ALL.iter().fold(Router::new(), |router, role| {
        router.merge(
            Router::new()
                .route(&format!("/get/{role}"), get(session))
                .route_layer(axum::middleware::from_fn_with_state(
                    Verifier::for_role(keys.clone(), *role),
                    verify_token,
                )),
        )
    });

    Router::new()
        .route("/login/{role}", post(login))
        .route("/logout/{role}", post(logout))
        .merge(sessions)
}
