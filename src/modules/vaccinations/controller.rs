use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::instrument;

use evrs_auth::{AuthError, Role};
use evrs_core::AppError;
use evrs_models::vaccinations::{
    AddVaccinationDto, CitizenVaccinations, UpdateVaccinationDto, VaccinationFilterParams,
    VaccinationRecord, VaccinationResponse,
};
use evrs_models::{MessageResponse, RecordedBy};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::modules::vaccinations::service::VaccinationService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// 404 carrying the patient when the citizen exists but has no records.
async fn citizen_vaccinations(state: &AppState, citizen_id: &str) -> Result<Response, AppError> {
    let found = VaccinationService::for_citizen(&state.db, citizen_id).await?;

    if found.records.is_empty() {
        let body = json!({
            "message": "No vaccination records found for this citizen",
            "patient": found.patient,
        });
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    }
    Ok(Json(found).into_response())
}

#[utoipa::path(
    post,
    path = "/api/{scope}/add-vaccination",
    params(("scope" = String, Path, description = "admin, hcp, hospital, moh or shared")),
    request_body = AddVaccinationDto,
    responses(
        (status = 201, description = "Vaccination recorded", body = VaccinationResponse),
        (status = 401, description = "Not authenticated", body = MessageResponse),
        (status = 403, description = "Invalid token or role not allowed", body = MessageResponse),
        (status = 404, description = "Unknown citizen or vaccine", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    tag = "Vaccinations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn add_vaccination(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(dto): ValidatedJson<AddVaccinationDto>,
) -> Result<(StatusCode, Json<VaccinationResponse>), AppError> {
    let record = VaccinationService::add(&state.db, dto, &RecordedBy::from(&claims)).await?;
    metrics::track_vaccination_recorded(claims.role);

    Ok((
        StatusCode::CREATED,
        Json(VaccinationResponse {
            message: "Vaccination record added successfully".to_string(),
            record,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/vaccinations",
    params(VaccinationFilterParams),
    responses((status = 200, description = "Records, newest first", body = Vec<VaccinationRecord>)),
    tag = "Vaccinations",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_vaccinations(
    State(state): State<AppState>,
    Query(filters): Query<VaccinationFilterParams>,
) -> Result<Json<Vec<VaccinationRecord>>, AppError> {
    Ok(Json(VaccinationService::list(&state.db, filters).await?))
}

/// A citizen and their records, each with the vaccine's name. Citizen
/// callers (through `/api/shared`) are limited to their own id.
#[utoipa::path(
    get,
    path = "/api/{scope}/vaccinations/{citizen_id}",
    params(
        ("scope" = String, Path, description = "admin, hcp, hospital, moh or shared"),
        ("citizen_id" = String, Path, description = "Citizen id")
    ),
    responses(
        (status = 200, description = "Citizen with records", body = CitizenVaccinations),
        (status = 401, description = "Not authenticated", body = MessageResponse),
        (status = 403, description = "Invalid token, or a citizen reading another citizen", body = MessageResponse),
        (status = 404, description = "Unknown citizen, or no records (body carries `patient`)", body = MessageResponse)
    ),
    tag = "Vaccinations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_citizen_vaccinations(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(citizen_id): Path<String>,
) -> Result<Response, AppError> {
    if claims.role == Role::Citizen && claims.id != citizen_id {
        return Ok(AuthError::Forbidden.into_response());
    }
    citizen_vaccinations(&state, &citizen_id).await
}

/// Citizens may only read their own records.
#[utoipa::path(
    get,
    path = "/api/citizen/vaccinations/{citizen_id}",
    params(("citizen_id" = String, Path, description = "Must equal the caller's citizen id")),
    responses(
        (status = 200, description = "Citizen with records", body = CitizenVaccinations),
        (status = 403, description = "Another citizen's records", body = MessageResponse),
        (status = 404, description = "No records", body = MessageResponse)
    ),
    tag = "Vaccinations",
    security(("citizen_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_own_vaccinations(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(citizen_id): Path<String>,
) -> Result<Response, AppError> {
    if claims.role != Role::Citizen || claims.id != citizen_id {
        return Ok(AuthError::Forbidden.into_response());
    }
    citizen_vaccinations(&state, &citizen_id).await
}

#[utoipa::path(
    get,
    path = "/api/admin/vaccination/{vaccination_id}",
    params(("vaccination_id" = String, Path, description = "Vaccination record id")),
    responses(
        (status = 200, description = "Record", body = VaccinationRecord),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Vaccinations",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_vaccination(
    State(state): State<AppState>,
    Path(vaccination_id): Path<String>,
) -> Result<Json<VaccinationRecord>, AppError> {
    Ok(Json(VaccinationService::get(&state.db, &vaccination_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/vaccination/{vaccination_id}",
    params(("vaccination_id" = String, Path, description = "Vaccination record id")),
    request_body = UpdateVaccinationDto,
    responses(
        (status = 200, description = "Record updated", body = VaccinationResponse),
        (status = 404, description = "Unknown record or vaccine", body = MessageResponse)
    ),
    tag = "Vaccinations",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_vaccination(
    State(state): State<AppState>,
    Path(vaccination_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateVaccinationDto>,
) -> Result<Json<VaccinationResponse>, AppError> {
    let record = VaccinationService::update(&state.db, &vaccination_id, dto).await?;
    Ok(Json(VaccinationResponse {
        message: "Vaccination record updated successfully".to_string(),
        record,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/vaccination/{vaccination_id}",
    params(("vaccination_id" = String, Path, description = "Vaccination record id")),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Vaccinations",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_vaccination(
    State(state): State<AppState>,
    Path(vaccination_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    VaccinationService::delete(&state.db, &vaccination_id).await?;
    Ok(Json(MessageResponse::new("Vaccination record deleted successfully")))
}
