use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use evrs_auth::Claims;

/// Login body. The id may be sent as `id` or under the role specific key
/// (`citizenId`, `hcpId`, `hospitalId`, `mohId`, `adminId`).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(
        alias = "citizenId",
        alias = "hcpId",
        alias = "hospitalId",
        alias = "mohId",
        alias = "adminId"
    )]
    #[validate(length(min = 1, message = "Id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    /// Public profile of the signed-in account
    #[schema(value_type = Object)]
    pub account: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub logged_in: bool,
    pub claims: Claims,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_role_specific_key() {
        let body: LoginRequest =
            serde_json::from_str(r#"{"hospitalId":"H1234567890","password":"pw"}"#).unwrap();
        assert_eq!(body.id, "H1234567890");

        let body: LoginRequest =
            serde_json::from_str(r#"{"id":"C1234567890","password":"pw"}"#).unwrap();
        assert_eq!(body.id, "C1234567890");
    }

    #[test]
    fn test_login_rejects_blank_fields() {
        let body: LoginRequest = serde_json::from_str(r#"{"id":"","password":"pw"}"#).unwrap();
        assert!(body.validate().is_err());
    }
}
