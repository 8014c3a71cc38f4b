use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use evrs_core::AppError;
use evrs_models::hcps::{HcpResponse, HealthcareProvider, RegisterHcpDto, UpdateHcpDto};
use evrs_models::{MessageResponse, RecordedBy, RegistrationResponse, SearchParams};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::modules::hcps::service::HcpService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/admin/register-hcp",
    request_body = RegisterHcpDto,
    responses(
        (status = 201, description = "Healthcare provider registered", body = RegistrationResponse),
        (status = 409, description = "Email or NIC already registered", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    tag = "Healthcare Providers",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_hcp(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterHcpDto>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let account = HcpService::register(&state.db, dto, &RecordedBy::from(&claims)).await?;
    metrics::track_account_registered(account.role);

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "Healthcare provider registered successfully".to_string(),
            account,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/hcps",
    params(SearchParams),
    responses((status = 200, description = "Healthcare providers, newest first", body = Vec<HealthcareProvider>)),
    tag = "Healthcare Providers",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_hcps(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<HealthcareProvider>>, AppError> {
    Ok(Json(HcpService::list(&state.db, params.search).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/hcp/{hcp_id}",
    params(("hcp_id" = String, Path, description = "Healthcare provider id")),
    responses(
        (status = 200, description = "Healthcare provider", body = HealthcareProvider),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Healthcare Providers",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_hcp(
    State(state): State<AppState>,
    Path(hcp_id): Path<String>,
) -> Result<Json<HealthcareProvider>, AppError> {
    Ok(Json(HcpService::get(&state.db, &hcp_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/hcp/{hcp_id}",
    params(("hcp_id" = String, Path, description = "Healthcare provider id")),
    request_body = UpdateHcpDto,
    responses(
        (status = 200, description = "Healthcare provider updated", body = HcpResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Email or NIC already in use", body = MessageResponse)
    ),
    tag = "Healthcare Providers",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_hcp(
    State(state): State<AppState>,
    Path(hcp_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateHcpDto>,
) -> Result<Json<HcpResponse>, AppError> {
    let hcp = HcpService::update(&state.db, &hcp_id, dto).await?;
    Ok(Json(HcpResponse {
        message: "Healthcare provider updated successfully".to_string(),
        hcp,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/hcp/{hcp_id}",
    params(("hcp_id" = String, Path, description = "Healthcare provider id")),
    responses(
        (status = 200, description = "Healthcare provider deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "Healthcare Providers",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_hcp(
    State(state): State<AppState>,
    Path(hcp_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    HcpService::delete(&state.db, &hcp_id).await?;
    Ok(Json(MessageResponse::new("Healthcare provider deleted successfully")))
}
