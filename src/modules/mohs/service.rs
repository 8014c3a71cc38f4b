use sqlx::PgPool;
use tracing::{info, instrument};

use evrs_auth::Role;
use evrs_core::ids::{MOH_PREFIX, generate_id, generate_password};
use evrs_core::{AppError, hash_password};
use evrs_models::common::like_pattern;
use evrs_models::mohs::{Moh, RegisterMohDto, UpdateMohDto};
use evrs_models::{RecordedBy, RegisteredAccount};

const MOH_COLUMNS: &str = "moh_id, name, contact_no, email, province, district, recorded_by_id, \
     recorded_by_role, created_at, updated_at";

pub struct MohService;

impl MohService {
    #[instrument(skip(db, dto), fields(db.table = "mohs"))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterMohDto,
        recorded_by: &RecordedBy,
    ) -> Result<RegisteredAccount, AppError> {
        let password = generate_password();
        let password_hash = hash_password(&password)?;

        let moh = sqlx::query_as::<_, Moh>(&format!(
            "INSERT INTO mohs (moh_id, name, contact_no, email, province, district, password_hash,
                 recorded_by_id, recorded_by_role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {MOH_COLUMNS}"
        ))
        .bind(generate_id(MOH_PREFIX))
        .bind(&dto.name)
        .bind(&dto.contact_no)
        .bind(dto.email.to_lowercase())
        .bind(&dto.province)
        .bind(&dto.district)
        .bind(&password_hash)
        .bind(&recorded_by.id)
        .bind(recorded_by.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "MOH with this email already exists"))?;

        info!(moh_id = %moh.moh_id, "MOH office registered");

        Ok(RegisteredAccount {
            id: moh.moh_id,
            role: Role::Moh,
            name: moh.name,
            password,
        })
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, search: Option<String>) -> Result<Vec<Moh>, AppError> {
        let mohs = sqlx::query_as::<_, Moh>(&format!(
            "SELECT {MOH_COLUMNS} FROM mohs
             WHERE ($1::text IS NULL
                    OR moh_id ILIKE $1
                    OR name ILIKE $1
                    OR email ILIKE $1
                    OR province ILIKE $1
                    OR district ILIKE $1)
             ORDER BY created_at DESC"
        ))
        .bind(search.as_deref().map(like_pattern))
        .fetch_all(db)
        .await?;
        Ok(mohs)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, moh_id: &str) -> Result<Moh, AppError> {
        sqlx::query_as::<_, Moh>(&format!("SELECT {MOH_COLUMNS} FROM mohs WHERE moh_id = $1"))
            .bind(moh_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("MOH not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, moh_id: &str, dto: UpdateMohDto) -> Result<Moh, AppError> {
        sqlx::query_as::<_, Moh>(&format!(
            "UPDATE mohs SET
                 name = COALESCE($2, name),
                 contact_no = COALESCE($3, contact_no),
                 email = COALESCE($4, email),
                 province = COALESCE($5, province),
                 district = COALESCE($6, district),
                 updated_at = NOW()
             WHERE moh_id = $1
             RETURNING {MOH_COLUMNS}"
        ))
        .bind(moh_id)
        .bind(dto.name)
        .bind(dto.contact_no)
        .bind(dto.email.map(|e| e.to_lowercase()))
        .bind(dto.province)
        .bind(dto.district)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "MOH with this email already exists"))?
        .ok_or_else(|| AppError::not_found("MOH not found"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, moh_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM mohs WHERE moh_id = $1")
            .bind(moh_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("MOH not found"));
        }
        info!(moh_id, "MOH office deleted");
        Ok(())
    }
}
