use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use evrs_core::AppError;
use evrs_models::hospitals::{Hospital, HospitalResponse, RegisterHospitalDto, UpdateHospitalDto};
use evrs_models::{MessageResponse, RecordedBy, RegistrationResponse, SearchParams};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::modules::hospitals::service::HospitalService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/admin/register-hospital",
    request_body = RegisterHospitalDto,
    responses(
        (status = 201, description = "Hospital registered", body = RegistrationResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    tag = "Hospitals",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_hospital(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterHospitalDto>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let account = HospitalService::register(&state.db, dto, &RecordedBy::from(&claims)).await?;
    metrics::track_account_registered(account.role);

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "Hospital registered successfully".to_string(),
            account,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/hospitals",
    params(SearchParams),
    responses((status = 200, description = "Hospitals, newest first", body = Vec<Hospital>)),
    tag = "Hospitals",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_hospitals(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Hospital>>, AppError> {
    Ok(Json(HospitalService::list(&state.db, params.search).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/hospital/{hospital_id}",
    params(("hospital_id" = String, Path, description = "Hospital id")),
    responses(
        (status = 200, description = "Hospital", body = Hospital),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Hospitals",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_hospital(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Hospital>, AppError> {
    Ok(Json(HospitalService::get(&state.db, &hospital_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/hospital/{hospital_id}",
    params(("hospital_id" = String, Path, description = "Hospital id")),
    request_body = UpdateHospitalDto,
    responses(
        (status = 200, description = "Hospital updated", body = HospitalResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Hospitals",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_hospital(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateHospitalDto>,
) -> Result<Json<HospitalResponse>, AppError> {
    let hospital = HospitalService::update(&state.db, &hospital_id, dto).await?;
    Ok(Json(HospitalResponse {
        message: "Hospital updated successfully".to_string(),
        hospital,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/hospital/{hospital_id}",
    params(("hospital_id" = String, Path, description = "Hospital id")),
    responses(
        (status = 200, description = "Hospital deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Hospitals",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_hospital(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    HospitalService::delete(&state.db, &hospital_id).await?;
    Ok(Json(MessageResponse::new("Hospital deleted successfully")))
}
