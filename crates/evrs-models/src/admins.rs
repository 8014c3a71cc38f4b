use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

use evrs_auth::Role;

use crate::common::RecordedBy;

/// Admin account. `recordedBy` is empty for admins bootstrapped from the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub admin_id: String,
    pub full_name: String,
    pub email: String,
    pub recorded_by: Option<RecordedBy>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Admin {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let recorded_by_id: Option<String> = row.try_get("recorded_by_id")?;
        let recorded_by_role: Option<String> = row.try_get("recorded_by_role")?;

        let recorded_by = match (recorded_by_id, recorded_by_role) {
            (Some(id), Some(role)) => {
                let role = role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
                    index: "recorded_by_role".to_string(),
                    source: Box::new(e),
                })?;
                Some(RecordedBy { id, role })
            }
            _ => None,
        };

        Ok(Self {
            admin_id: row.try_get("admin_id")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            recorded_by,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminDto {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}
