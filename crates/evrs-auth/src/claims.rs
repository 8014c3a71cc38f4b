use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

/// Token payload. A token whose `role` is not one of the five roles fails to
/// decode and is treated as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Public id of the account, e.g. `HCP1234567890`.
    pub id: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            id: "C1234567890".to_string(),
            role: Role::Citizen,
            iat: 1_700_000_000,
            exp: 1_700_604_800,
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains(r#""id":"C1234567890""#));
        assert!(json.contains(r#""role":"citizen""#));
    }

    #[test]
    fn test_unknown_role_does_not_decode() {
        let json = r#"{"id":"X1","role":"superuser","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
