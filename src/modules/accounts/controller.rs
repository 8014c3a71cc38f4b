use axum::{Json, extract::State};
use serde_json::Value;
use tracing::instrument;

use evrs_core::AppError;
use evrs_models::patients::{MedicalResponse, PatientResponse, UpdateContactDto, UpdateMedicalDto};
use evrs_models::{ChangePasswordDto, MessageResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::accounts::service::AccountService;
use crate::modules::patients::service::PatientService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Profile of the authenticated account. The shape depends on the role.
#[utoipa::path(
    get,
    path = "/api/{scope}/get/profile",
    params(("scope" = String, Path, description = "admin, citizen, hcp, hospital or moh")),
    responses(
        (status = 200, description = "Account profile", body = serde_json::Value),
        (status = 401, description = "Not authenticated", body = MessageResponse),
        (status = 403, description = "Invalid token or wrong role", body = MessageResponse),
        (status = 404, description = "Account no longer exists", body = MessageResponse)
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    Ok(Json(
        AccountService::profile(&state.db, user.role(), user.id()).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/{scope}/profile/password",
    params(("scope" = String, Path, description = "admin, citizen, hcp, hospital or moh")),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "New password too short or unchanged", body = MessageResponse),
        (status = 401, description = "Current password is incorrect", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AccountService::change_password(&state.db, user.role(), user.id(), dto).await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}

#[utoipa::path(
    put,
    path = "/api/citizen/profile",
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Contact details updated", body = PatientResponse),
        (status = 404, description = "Citizen not found", body = MessageResponse),
        (status = 422, description = "Neither phoneNumber nor address given", body = MessageResponse)
    ),
    tag = "Accounts",
    security(("citizen_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_contact(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateContactDto>,
) -> Result<Json<PatientResponse>, AppError> {
    let patient = PatientService::update_contact(&state.db, user.id(), dto).await?;
    Ok(Json(PatientResponse {
        message: "Profile updated successfully".to_string(),
        patient,
    }))
}

#[utoipa::path(
    put,
    path = "/api/citizen/profile/medical",
    request_body = UpdateMedicalDto,
    responses(
        (status = 200, description = "Medical information updated", body = MedicalResponse),
        (status = 404, description = "Citizen not found", body = MessageResponse),
        (status = 422, description = "No medical field given", body = MessageResponse)
    ),
    tag = "Accounts",
    security(("citizen_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_medical(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateMedicalDto>,
) -> Result<Json<MedicalResponse>, AppError> {
    let medical = PatientService::update_medical(&state.db, user.id(), dto).await?;
    Ok(Json(MedicalResponse {
        message: "Medical information updated successfully".to_string(),
        medical,
    }))
}
