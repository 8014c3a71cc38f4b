use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::role::Role;

/// Why a request was refused by a verifier or the guard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Token is not valid for the {expected} role")]
    RoleMismatch { expected: Role, actual: Role },
    #[error("Forbidden")]
    Forbidden,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken | AuthError::RoleMismatch { .. } | AuthError::Forbidden => {
                StatusCode::FORBIDDEN
            }
        }
    }

    /// Short label used for logs and rejection counters.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::InvalidToken => "invalid_token",
            AuthError::RoleMismatch { .. } => "role_mismatch",
            AuthError::Forbidden => "forbidden",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::Forbidden.status(), StatusCode::FORBIDDEN);
        let mismatch = AuthError::RoleMismatch {
            expected: Role::Admin,
            actual: Role::Citizen,
        };
        assert_eq!(mismatch.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_response_body_has_message() {
        let response = AuthError::RoleMismatch {
            expected: Role::Moh,
            actual: Role::Hcp,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Token is not valid for the moh role");
    }
}
