use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{info, instrument};

use evrs_auth::Role;
use evrs_config::CookieConfig;
use evrs_core::AppError;
use evrs_models::MessageResponse;
use evrs_models::auth::{LoginRequest, LoginResponse, SessionResponse};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::modules::accounts::service::AccountService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn parse_role(role: &str) -> Result<Role, AppError> {
    role.parse::<Role>()
        .map_err(|e| AppError::not_found(e.to_string()))
}

fn session_cookie(config: &CookieConfig, role: Role, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::build((role.cookie_name(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.secure)
        .max_age(time::Duration::seconds(config.max_age));
    if let Some(domain) = &config.domain {
        cookie = cookie.domain(domain.clone());
    }
    cookie.build()
}

fn removal_cookie(config: &CookieConfig, role: Role) -> Cookie<'static> {
    let mut cookie = Cookie::build(role.cookie_name()).path("/");
    if let Some(domain) = &config.domain {
        cookie = cookie.domain(domain.clone());
    }
    cookie.build()
}

/// Sign in as `role`. Sets the `<role>_token` cookie and also returns the
/// token for clients that send it as a bearer header.
#[utoipa::path(
    post,
    path = "/api/auth/login/{role}",
    params(("role" = Role, Path, description = "Account kind to sign in as")),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; `<role>_token` cookie set", body = LoginResponse),
        (status = 400, description = "Malformed body", body = MessageResponse),
        (status = 401, description = "Unknown account or wrong password", body = MessageResponse),
        (status = 404, description = "Unknown role", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let role = parse_role(&role)?;

    let account = match AccountService::authenticate(&state.db, role, &dto.id, &dto.password).await
    {
        Ok(account) => account,
        Err(err) => {
            metrics::track_login(role, false);
            return Err(err);
        }
    };

    let token = state.keys.issue(role, &dto.id)?;
    metrics::track_login(role, true);
    metrics::track_token_issued(role);
    info!(%role, id = %dto.id, "Signed in");

    let jar = jar.add(session_cookie(&state.cookie_config, role, token.clone()));
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            token,
            account,
        }),
    ))
}

/// Clears the `<role>_token` cookie. Issued tokens stay valid until they expire.
#[utoipa::path(
    post,
    path = "/api/auth/logout/{role}",
    params(("role" = Role, Path, description = "Account kind to sign out of")),
    responses(
        (status = 200, description = "Cookie cleared", body = MessageResponse),
        (status = 404, description = "Unknown role", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    Path(role): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let role = parse_role(&role)?;
    let jar = jar.remove(removal_cookie(&state.cookie_config, role));
    Ok((jar, Json(MessageResponse::new("Logged out successfully"))))
}

/// Reports the claims of a valid `<role>_token`.
#[utoipa::path(
    get,
    path = "/api/auth/get/{role}",
    params(("role" = Role, Path, description = "Role whose token is checked")),
    responses(
        (status = 200, description = "Token valid for the role", body = SessionResponse),
        (status = 401, description = "No token", body = MessageResponse),
        (status = 403, description = "Invalid, expired or other-role token", body = MessageResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument]
pub async fn session(AuthUser(claims): AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        logged_in: true,
        claims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = CookieConfig {
            secure: true,
            domain: Some("evrs.example".to_string()),
            max_age: 3600,
        };
        let cookie = session_cookie(&config, Role::Hcp, "tok".to_string());

        assert_eq!(cookie.name(), "hcp_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.domain(), Some("evrs.example"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    }

    #[test]
    fn test_session_cookie_without_domain() {
        let config = CookieConfig {
            secure: false,
            domain: None,
            max_age: 60,
        };
        let cookie = session_cookie(&config, Role::Citizen, "tok".to_string());
        assert_eq!(cookie.name(), "citizen_token");
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.domain(), None);
    }

    #[test]
    fn test_unknown_role_is_not_found() {
        let err = parse_role("pharmacist").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }
}
