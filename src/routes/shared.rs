use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use evrs_auth::{Role, TokenKeys};

use crate::middleware::auth::{Verifier, verify_token};
use crate::middleware::role::{AllowedRoles, require_roles};
use crate::modules::{
    patients::controller as patients, vaccinations::controller as vaccinations,
    vaccines::controller as vaccines,
};
use crate::state::AppState;

/// Endpoints reachable with any non-admin session. Writes are further limited
/// to provider roles.
pub fn init_shared_router(keys: Arc<TokenKeys>) -> Router<AppState> {
    let writes = Router::new()
        .route("/add-vaccination", post(vaccinations::add_vaccination))
        .route("/register-patient", post(patients::register_patient))
        .route_layer(middleware::from_fn_with_state(
            AllowedRoles::new(&Role::PROVIDERS),
            require_roles,
        ));

    Router::new()
        .route("/vaccines", get(vaccines::get_vaccines))
        .route(
            "/vaccinations/{citizen_id}",
            get(vaccinations::get_citizen_vaccinations),
        )
        .merge(writes)
        .route_layer(middleware::from_fn_with_state(
            Verifier::any(keys),
            verify_token,
        ))
}
