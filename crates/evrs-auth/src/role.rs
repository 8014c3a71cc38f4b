use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use evrs_core::ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Hcp,
    Hospital,
    Moh,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Citizen,
        Role::Hcp,
        Role::Hospital,
        Role::Moh,
        Role::Admin,
    ];

    /// Roles the generic verifier accepts, in the order their cookies are tried.
    pub const NON_ADMIN: [Role; 4] = [Role::Citizen, Role::Hcp, Role::Hospital, Role::Moh];

    /// Roles that may record vaccinations and register patients outside the admin panel.
    pub const PROVIDERS: [Role; 3] = [Role::Hcp, Role::Hospital, Role::Moh];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Hcp => "hcp",
            Role::Hospital => "hospital",
            Role::Moh => "moh",
            Role::Admin => "admin",
        }
    }

    pub fn cookie_name(self) -> &'static str {
        match self {
            Role::Citizen => "citizen_token",
            Role::Hcp => "hcp_token",
            Role::Hospital => "hospital_token",
            Role::Moh => "moh_token",
            Role::Admin => "admin_token",
        }
    }

    pub fn id_prefix(self) -> &'static str {
        match self {
            Role::Citizen => ids::CITIZEN_PREFIX,
            Role::Hcp => ids::HCP_PREFIX,
            Role::Hospital => ids::HOSPITAL_PREFIX,
            Role::Moh => ids::MOH_PREFIX,
            Role::Admin => ids::ADMIN_PREFIX,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_names() {
        let names: Vec<_> = Role::ALL.iter().map(|r| r.cookie_name()).collect();
        assert_eq!(
            names,
            vec![
                "citizen_token",
                "hcp_token",
                "hospital_token",
                "moh_token",
                "admin_token"
            ]
        );
    }

    #[test]
    fn test_parse_round_trips_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_parse_unknown_role() {
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(UnknownRole("superuser".to_string()))
        );
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Moh).unwrap(), r#""moh""#);
        let role: Role = serde_json::from_str(r#""hospital""#).unwrap();
        assert_eq!(role, Role::Hospital);
        assert!(serde_json::from_str::<Role>(r#""doctor""#).is_err());
    }

    #[test]
    fn test_non_admin_excludes_admin() {
        assert!(!Role::NON_ADMIN.contains(&Role::Admin));
        assert_eq!(Role::NON_ADMIN[0], Role::Citizen);
    }

    #[test]
    fn test_id_prefixes() {
        assert_eq!(Role::Citizen.id_prefix(), "C");
        assert_eq!(Role::Hcp.id_prefix(), "HCP");
        assert_eq!(Role::Admin.id_prefix(), "A");
    }
}
