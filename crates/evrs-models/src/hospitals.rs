use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use evrs_core::serde::deserialize_optional_string;

use crate::common::RecordedBy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub hospital_id: String,
    pub name: String,
    pub email: String,
    pub province: String,
    pub district: String,
    #[sqlx(flatten)]
    pub recorded_by: RecordedBy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterHospitalDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
    #[validate(length(min = 1, message = "District is required"))]
    pub district: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHospitalDto {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub district: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HospitalResponse {
    pub message: String,
    pub hospital: Hospital,
}
