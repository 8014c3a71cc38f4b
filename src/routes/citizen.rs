use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};

use evrs_auth::{Role, TokenKeys};

use crate::middleware::protect;
use crate::modules::{accounts::controller as accounts, vaccinations::controller as vaccinations};
use crate::state::AppState;

pub fn init_citizen_router(keys: Arc<TokenKeys>) -> Router<AppState> {
    let router = Router::new()
        .route(
            "/vaccinations/{citizen_id}",
            get(vaccinations::get_own_vaccinations),
        )
        .route("/get/profile", get(accounts::get_profile))
        .route("/profile", put(accounts::update_contact))
        .route("/profile/medical", put(accounts::update_medical))
        .route("/profile/password", put(accounts::change_password));

    protect(router, keys, Role::Citizen)
}
