use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use evrs_core::AppError;
use evrs_models::patients::{
    Patient, PatientFilterParams, PatientResponse, RegisterPatientDto, UpdatePatientDto,
};
use evrs_models::{MessageResponse, RecordedBy, RegistrationResponse};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::modules::patients::service::PatientService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a citizen. Returns the generated citizen id and a one-time password.
#[utoipa::path(
    post,
    path = "/api/{scope}/register-patient",
    params(("scope" = String, Path, description = "admin, hospital, moh or shared")),
    request_body = RegisterPatientDto,
    responses(
        (status = 201, description = "Patient registered", body = RegistrationResponse),
        (status = 400, description = "Malformed body", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = MessageResponse),
        (status = 403, description = "Invalid token or role not allowed", body = MessageResponse),
        (status = 409, description = "Serial number already registered", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    tag = "Patients",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_patient(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterPatientDto>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let account = PatientService::register(&state.db, dto, &RecordedBy::from(&claims)).await?;
    metrics::track_account_registered(account.role);

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "Patient registered successfully".to_string(),
            account,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/patients",
    params(PatientFilterParams),
    responses(
        (status = 200, description = "Patients, newest first", body = Vec<Patient>),
        (status = 401, description = "Not authenticated", body = MessageResponse),
        (status = 403, description = "Not an admin", body = MessageResponse)
    ),
    tag = "Patients",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_patients(
    State(state): State<AppState>,
    Query(filters): Query<PatientFilterParams>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let patients = PatientService::list(&state.db, filters).await?;
    Ok(Json(patients))
}

#[utoipa::path(
    get,
    path = "/api/admin/patient/{citizen_id}",
    params(("citizen_id" = String, Path, description = "Citizen id")),
    responses(
        (status = 200, description = "Patient", body = Patient),
        (status = 404, description = "Patient not found", body = MessageResponse)
    ),
    tag = "Patients",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(citizen_id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let patient = PatientService::get(&state.db, &citizen_id).await?;
    Ok(Json(patient))
}

#[utoipa::path(
    put,
    path = "/api/admin/patient/{citizen_id}",
    params(("citizen_id" = String, Path, description = "Citizen id")),
    request_body = UpdatePatientDto,
    responses(
        (status = 200, description = "Patient updated", body = PatientResponse),
        (status = 404, description = "Patient not found", body = MessageResponse)
    ),
    tag = "Patients",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(citizen_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdatePatientDto>,
) -> Result<Json<PatientResponse>, AppError> {
    let patient = PatientService::update(&state.db, &citizen_id, dto).await?;
    Ok(Json(PatientResponse {
        message: "Patient updated successfully".to_string(),
        patient,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/patient/{citizen_id}",
    params(("citizen_id" = String, Path, description = "Citizen id")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageResponse),
        (status = 404, description = "Patient not found", body = MessageResponse)
    ),
    tag = "Patients",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(citizen_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    PatientService::delete(&state.db, &citizen_id).await?;
    Ok(Json(MessageResponse::new("Patient deleted successfully")))
}
