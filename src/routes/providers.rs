use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use evrs_auth::{Role, TokenKeys};

use crate::middleware::protect;
use crate::modules::{
    accounts::controller as accounts, patients::controller as patients,
    vaccinations::controller as vaccinations, vaccines::controller as vaccines,
};
use crate::state::AppState;

/// Routes for a provider role (`hcp`, `hospital` or `moh`). Only hospitals
/// and MOH offices may register citizens.
pub fn init_provider_router(keys: Arc<TokenKeys>, role: Role) -> Router<AppState> {
    let mut router = Router::new()
        .route("/vaccines", get(vaccines::get_vaccines))
        .route(
            "/vaccinations/{citizen_id}",
            get(vaccinations::get_citizen_vaccinations),
        )
        .route("/add-vaccination", post(vaccinations::add_vaccination))
        .route("/get/profile", get(accounts::get_profile))
        .route("/profile/password", put(accounts::change_password));

    if matches!(role, Role::Hospital | Role::Moh) {
        router = router.route("/register-patient", post(patients::register_patient));
    }

    protect(router, keys, role)
}
