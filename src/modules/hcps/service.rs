use sqlx::PgPool;
use tracing::{info, instrument};

use evrs_auth::Role;
use evrs_core::ids::{HCP_PREFIX, generate_id, generate_password};
use evrs_core::{AppError, hash_password};
use evrs_models::common::like_pattern;
use evrs_models::hcps::{HealthcareProvider, RegisterHcpDto, UpdateHcpDto};
use evrs_models::{RecordedBy, RegisteredAccount};

const HCP_COLUMNS: &str = "hcp_id, designation, full_name, email, nic, recorded_by_id, \
     recorded_by_role, created_at, updated_at";

const DUPLICATE: &str = "A healthcare provider with this email or NIC already exists";

pub struct HcpService;

impl HcpService {
    #[instrument(skip(db, dto), fields(db.table = "healthcare_providers"))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterHcpDto,
        recorded_by: &RecordedBy,
    ) -> Result<RegisteredAccount, AppError> {
        let hcp_id = generate_id(HCP_PREFIX);
        let password = generate_password();
        let password_hash = hash_password(&password)?;

        let hcp = sqlx::query_as::<_, HealthcareProvider>(&format!(
            "INSERT INTO healthcare_providers (hcp_id, designation, full_name, email, nic,
                 password_hash, recorded_by_id, recorded_by_role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {HCP_COLUMNS}"
        ))
        .bind(&hcp_id)
        .bind(dto.designation.as_str())
        .bind(&dto.full_name)
        .bind(dto.email.to_lowercase())
        .bind(&dto.nic)
        .bind(&password_hash)
        .bind(&recorded_by.id)
        .bind(recorded_by.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))?;

        info!(hcp_id = %hcp.hcp_id, designation = %hcp.designation, "Healthcare provider registered");

        Ok(RegisteredAccount {
            id: hcp.hcp_id,
            role: Role::Hcp,
            name: hcp.full_name,
            password,
        })
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        search: Option<String>,
    ) -> Result<Vec<HealthcareProvider>, AppError> {
        let hcps = sqlx::query_as::<_, HealthcareProvider>(&format!(
            "SELECT {HCP_COLUMNS} FROM healthcare_providers
             WHERE ($1::text IS NULL
                    OR hcp_id ILIKE $1
                    OR full_name ILIKE $1
                    OR email ILIKE $1
                    OR nic ILIKE $1
                    OR designation ILIKE $1)
             ORDER BY created_at DESC"
        ))
        .bind(search.as_deref().map(like_pattern))
        .fetch_all(db)
        .await?;
        Ok(hcps)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, hcp_id: &str) -> Result<HealthcareProvider, AppError> {
        sqlx::query_as::<_, HealthcareProvider>(&format!(
            "SELECT {HCP_COLUMNS} FROM healthcare_providers WHERE hcp_id = $1"
        ))
        .bind(hcp_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Healthcare provider not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        hcp_id: &str,
        dto: UpdateHcpDto,
    ) -> Result<HealthcareProvider, AppError> {
        sqlx::query_as::<_, HealthcareProvider>(&format!(
            "UPDATE healthcare_providers SET
                 designation = COALESCE($2, designation),
                 full_name = COALESCE($3, full_name),
                 email = COALESCE($4, email),
                 nic = COALESCE($5, nic),
                 updated_at = NOW()
             WHERE hcp_id = $1
             RETURNING {HCP_COLUMNS}"
        ))
        .bind(hcp_id)
        .bind(dto.designation.map(|d| d.as_str()))
        .bind(dto.full_name)
        .bind(dto.email.map(|e| e.to_lowercase()))
        .bind(dto.nic)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))?
        .ok_or_else(|| AppError::not_found("Healthcare provider not found"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, hcp_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM healthcare_providers WHERE hcp_id = $1")
            .bind(hcp_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Healthcare provider not found"));
        }
        info!(hcp_id, "Healthcare provider deleted");
        Ok(())
    }
}
