use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use evrs_core::AppError;
use evrs_models::mohs::{Moh, MohResponse, RegisterMohDto, UpdateMohDto};
use evrs_models::{MessageResponse, RecordedBy, RegistrationResponse, SearchParams};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::modules::mohs::service::MohService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/admin/register-moh",
    request_body = RegisterMohDto,
    responses(
        (status = 201, description = "MOH registered", body = RegistrationResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    tag = "MOH Offices",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_moh(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterMohDto>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let account = MohService::register(&state.db, dto, &RecordedBy::from(&claims)).await?;
    metrics::track_account_registered(account.role);

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "MOH registered successfully".to_string(),
            account,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/mohs",
    params(SearchParams),
    responses((status = 200, description = "MOH offices, newest first", body = Vec<Moh>)),
    tag = "MOH Offices",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_mohs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Moh>>, AppError> {
    Ok(Json(MohService::list(&state.db, params.search).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/moh/{moh_id}",
    params(("moh_id" = String, Path, description = "MOH id")),
    responses(
        (status = 200, description = "MOH office", body = Moh),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "MOH Offices",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_moh(
    State(state): State<AppState>,
    Path(moh_id): Path<String>,
) -> Result<Json<Moh>, AppError> {
    Ok(Json(MohService::get(&state.db, &moh_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/moh/{moh_id}",
    params(("moh_id" = String, Path, description = "MOH id")),
    request_body = UpdateMohDto,
    responses(
        (status = 200, description = "MOH updated", body = MohResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "MOH Offices",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_moh(
    State(state): State<AppState>,
    Path(moh_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateMohDto>,
) -> Result<Json<MohResponse>, AppError> {
    let moh = MohService::update(&state.db, &moh_id, dto).await?;
    Ok(Json(MohResponse {
        message: "MOH updated successfully".to_string(),
        moh,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/moh/{moh_id}",
    params(("moh_id" = String, Path, description = "MOH id")),
    responses(
        (status = 200, description = "MOH deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    tag = "MOH Offices",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_moh(
    State(state): State<AppState>,
    Path(moh_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    MohService::delete(&state.db, &moh_id).await?;
    Ok(Json(MessageResponse::new("MOH deleted successfully")))
}
