use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use evrs_core::serde::deserialize_optional_string;

use crate::common::RecordedBy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub vaccine_id: String,
    pub name: String,
    pub side_effects: String,
    #[sqlx(flatten)]
    pub recorded_by: RecordedBy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVaccineDto {
    #[validate(length(min = 1, message = "Vaccine name is required"))]
    pub name: String,
    #[serde(default)]
    pub side_effects: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVaccineDto {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    /// Replaces the side effects text; an empty string clears it.
    pub side_effects: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VaccineResponse {
    pub message: String,
    pub vaccine: Vaccine,
}
