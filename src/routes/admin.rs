use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use evrs_auth::{Role, TokenKeys};

use crate::middleware::protect;
use crate::modules::{
    accounts::controller as accounts, admins::controller as admins, hcps::controller as hcps,
    hospitals::controller as hospitals, mohs::controller as mohs,
    patients::controller as patients, vaccinations::controller as vaccinations,
    vaccines::controller as vaccines,
};
use crate::state::AppState;

pub fn init_admin_router(keys: Arc<TokenKeys>) -> Router<AppState> {
    let router = Router::new()
        .route("/register-admin", post(admins::register_admin))
        .route("/admins", get(admins::get_admins))
        .route("/get/profile", get(accounts::get_profile))
        .route("/profile/password", put(accounts::change_password))
        .route("/register-patient", post(patients::register_patient))
        .route("/patients", get(patients::get_patients))
        .route(
            "/patient/{citizen_id}",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/register-hospital", post(hospitals::register_hospital))
        .route("/hospitals", get(hospitals::get_hospitals))
        .route(
            "/hospital/{hospital_id}",
            get(hospitals::get_hospital)
                .put(hospitals::update_hospital)
                .delete(hospitals::delete_hospital),
        )
        .route("/register-moh", post(mohs::register_moh))
        .route("/mohs", get(mohs::get_mohs))
        .route(
            "/moh/{moh_id}",
            get(mohs::get_moh)
                .put(mohs::update_moh)
                .delete(mohs::delete_moh),
        )
        .route("/register-hcp", post(hcps::register_hcp))
        .route("/hcps", get(hcps::get_hcps))
        .route(
            "/hcp/{hcp_id}",
            get(hcps::get_hcp)
                .put(hcps::update_hcp)
                .delete(hcps::delete_hcp),
        )
        .route("/add-vaccination", post(vaccinations::add_vaccination))
        .route("/vaccinations", get(vaccinations::get_vaccinations))
        .route(
            "/vaccinations/{citizen_id}",
            get(vaccinations::get_citizen_vaccinations),
        )
        .route(
            "/vaccination/{vaccination_id}",
            get(vaccinations::get_vaccination)
                .put(vaccinations::update_vaccination)
                .delete(vaccinations::delete_vaccination),
        )
        .route("/register-vaccine", post(vaccines::register_vaccine))
        .route("/vaccines", get(vaccines::get_vaccines))
        .route(
            "/vaccine/{vaccine_id}",
            get(vaccines::get_vaccine)
                .put(vaccines::update_vaccine)
                .delete(vaccines::delete_vaccine),
        );

    protect(router, keys, Role::Admin)
}
