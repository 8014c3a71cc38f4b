//! Healthcare providers: doctors, nurses and midwives.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use evrs_core::serde::deserialize_optional_string;

use crate::common::RecordedBy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Designation {
    Doctor,
    Nurse,
    Midwife,
}

impl Designation {
    pub fn as_str(self) -> &'static str {
        match self {
            Designation::Doctor => "doctor",
            Designation::Nurse => "nurse",
            Designation::Midwife => "midwife",
        }
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDesignation(pub String);

impl fmt::Display for UnknownDesignation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown designation: {}", self.0)
    }
}

impl std::error::Error for UnknownDesignation {}

impl FromStr for Designation {
    type Err = UnknownDesignation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Designation::Doctor),
            "nurse" => Ok(Designation::Nurse),
            "midwife" => Ok(Designation::Midwife),
            other => Err(UnknownDesignation(other.to_string())),
        }
    }
}

impl TryFrom<String> for Designation {
    type Error = UnknownDesignation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthcareProvider {
    pub hcp_id: String,
    #[sqlx(try_from = "String")]
    pub designation: Designation,
    pub full_name: String,
    pub email: String,
    pub nic: String,
    #[sqlx(flatten)]
    pub recorded_by: RecordedBy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterHcpDto {
    pub designation: Designation,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "NIC is required"))]
    pub nic: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHcpDto {
    pub designation: Option<Designation>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub nic: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HcpResponse {
    pub message: String,
    pub hcp: HealthcareProvider,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designation_parse() {
        assert_eq!("midwife".parse::<Designation>(), Ok(Designation::Midwife));
        assert!("surgeon".parse::<Designation>().is_err());
    }

    #[test]
    fn test_register_rejects_bad_email_and_designation() {
        let dto: RegisterHcpDto = serde_json::from_str(
            r#"{"designation":"nurse","fullName":"A B","email":"nope","nic":"1"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());

        assert!(
            serde_json::from_str::<RegisterHcpDto>(
                r#"{"designation":"surgeon","fullName":"A B","email":"a@b.lk","nic":"1"}"#
            )
            .is_err()
        );
    }
}
