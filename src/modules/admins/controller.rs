use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use evrs_core::AppError;
use evrs_models::admins::{Admin, RegisterAdminDto};
use evrs_models::{MessageResponse, RecordedBy, RegistrationResponse};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::modules::admins::service::AdminService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/admin/register-admin",
    request_body = RegisterAdminDto,
    responses(
        (status = 201, description = "Admin registered", body = RegistrationResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    tag = "Admins",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_admin(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterAdminDto>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let account = AdminService::register(&state.db, dto, &RecordedBy::from(&claims)).await?;
    metrics::track_account_registered(account.role);

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "Admin registered successfully".to_string(),
            account,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/admins",
    responses((status = 200, description = "Admins, newest first", body = Vec<Admin>)),
    tag = "Admins",
    security(("admin_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_admins(State(state): State<AppState>) -> Result<Json<Vec<Admin>>, AppError> {
    Ok(Json(AdminService::list(&state.db).await?))
}
