use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use evrs_core::AppError;
use evrs_models::vaccines::{RegisterVaccineDto, UpdateVaccineDto, Vaccine, VaccineResponse};
use evrs_models::{MessageResponse, RecordedBy, SearchParams};

use crate::middleware::auth::AuthUser;
use crate::modules::vaccines::service::VaccineService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/admin/register-vaccine",
    request_body = RegisterVaccineDto,
    responses(
        (status = 201, description = "Vaccine registered", body = VaccineResponse),
        (status = 409, description = "Name already registered", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    tag = "Vaccines",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_vaccine(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterVaccineDto>,
) -> Result<(StatusCode, Json<VaccineResponse>), AppError> {
    let vaccine = VaccineService::register(&state.db, dto, &RecordedBy::from(&claims)).await?;

    Ok((
        StatusCode::CREATED,
        Json(VaccineResponse {
            message: "Vaccine registered successfully".to_string(),
            vaccine,
        }),
    ))
}

/// Vaccine catalogue, readable by every authenticated role except citizens.
#[utoipa::path(
    get,
    path = "/api/{scope}/vaccines",
    params(
        ("scope" = String, Path, description = "admin, hcp, hospital, moh or shared"),
        SearchParams
    ),
    responses(
        (status = 200, description = "Vaccines ordered by name", body = Vec<Vaccine>),
        (status = 401, description = "Not authenticated", body = MessageResponse),
        (status = 403, description = "Invalid token", body = MessageResponse)
    ),
    tag = "Vaccines",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_vaccines(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Vaccine>>, AppError> {
    Ok(Json(VaccineService::list(&state.db, params.search).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/vaccine/{vaccine_id}",
    params(("vaccine_id" = String, Path, description = "Vaccine id")),
    responses(
        (status = 200, description = "Vaccine", body = Vaccine),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Vaccines",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_vaccine(
    State(state): State<AppState>,
    Path(vaccine_id): Path<String>,
) -> Result<Json<Vaccine>, AppError> {
    Ok(Json(VaccineService::get(&state.db, &vaccine_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/vaccine/{vaccine_id}",
    params(("vaccine_id" = String, Path, description = "Vaccine id")),
    request_body = UpdateVaccineDto,
    responses(
        (status = 200, description = "Vaccine updated", body = VaccineResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Name already registered", body = MessageResponse)
    ),
    tag = "Vaccines",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_vaccine(
    State(state): State<AppState>,
    Path(vaccine_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateVaccineDto>,
) -> Result<Json<VaccineResponse>, AppError> {
    let vaccine = VaccineService::update(&state.db, &vaccine_id, dto).await?;
    Ok(Json(VaccineResponse {
        message: "Vaccine updated successfully".to_string(),
        vaccine,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/vaccine/{vaccine_id}",
    params(("vaccine_id" = String, Path, description = "Vaccine id")),
    responses(
        (status = 200, description = "Vaccine deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Vaccines",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_vaccine(
    State(state): State<AppState>,
    Path(vaccine_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    VaccineService::delete(&state.db, &vaccine_id).await?;
    Ok(Json(MessageResponse::new("Vaccine deleted successfully")))
}
