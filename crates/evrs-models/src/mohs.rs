use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use evrs_core::serde::deserialize_optional_string;

use crate::common::RecordedBy;

/// A Medical Officer of Health office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Moh {
    pub moh_id: String,
    pub name: String,
    pub contact_no: String,
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
pub struct RegisterMohDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact_no: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
    #[validate(length(min = 1, message = "District is required"))]
    pub district: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMohDto {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub contact_no: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub district: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MohResponse {
    pub message: String,
    pub moh: Moh,
}
