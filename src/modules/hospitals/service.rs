use sqlx::PgPool;
use tracing::{info, instrument};

use evrs_auth::Role;
use evrs_core::ids::{HOSPITAL_PREFIX, generate_id, generate_password};
use evrs_core::{AppError, hash_password};
use evrs_models::common::like_pattern;
use evrs_models::hospitals::{Hospital, RegisterHospitalDto, UpdateHospitalDto};
use evrs_models::{RecordedBy, RegisteredAccount};

const HOSPITAL_COLUMNS: &str = "hospital_id, name, email, province, district, recorded_by_id, \
     recorded_by_role, created_at, updated_at";

pub struct HospitalService;

impl HospitalService {
    #[instrument(skip(db, dto), fields(db.table = "hospitals"))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterHospitalDto,
        recorded_by: &RecordedBy,
    ) -> Result<RegisteredAccount, AppError> {
        let password = generate_password();
        let password_hash = hash_password(&password)?;

        let hospital = sqlx::query_as::<_, Hospital>(&format!(
            "INSERT INTO hospitals (hospital_id, name, email, province, district, password_hash,
                 recorded_by_id, recorded_by_role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {HOSPITAL_COLUMNS}"
        ))
        .bind(generate_id(HOSPITAL_PREFIX))
        .bind(&dto.name)
        .bind(dto.email.to_lowercase())
        .bind(&dto.province)
        .bind(&dto.district)
        .bind(&password_hash)
        .bind(&recorded_by.id)
        .bind(recorded_by.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Hospital with this email already exists"))?;

        info!(hospital_id = %hospital.hospital_id, "Hospital registered");

        Ok(RegisteredAccount {
            id: hospital.hospital_id,
            role: Role::Hospital,
            name: hospital.name,
            password,
        })
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, search: Option<String>) -> Result<Vec<Hospital>, AppError> {
        let hospitals = sqlx::query_as::<_, Hospital>(&format!(
            "SELECT {HOSPITAL_COLUMNS} FROM hospitals
             WHERE ($1::text IS NULL
                    OR hospital_id ILIKE $1
                    OR name ILIKE $1
                    OR email ILIKE $1
                    OR province ILIKE $1
                    OR district ILIKE $1)
             ORDER BY created_at DESC"
        ))
        .bind(search.as_deref().map(like_pattern))
        .fetch_all(db)
        .await?;
        Ok(hospitals)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, hospital_id: &str) -> Result<Hospital, AppError> {
        sqlx::query_as::<_, Hospital>(&format!(
            "SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE hospital_id = $1"
        ))
        .bind(hospital_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Hospital not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        hospital_id: &str,
        dto: UpdateHospitalDto,
    ) -> Result<Hospital, AppError> {
        sqlx::query_as::<_, Hospital>(&format!(
            "UPDATE hospitals SET
                 name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 province = COALESCE($4, province),
                 district = COALESCE($5, district),
                 updated_at = NOW()
             WHERE hospital_id = $1
             RETURNING {HOSPITAL_COLUMNS}"
        ))
        .bind(hospital_id)
        .bind(dto.name)
        .bind(dto.email.map(|e| e.to_lowercase()))
        .bind(dto.province)
        .bind(dto.district)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Hospital with this email already exists"))?
        .ok_or_else(|| AppError::not_found("Hospital not found"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, hospital_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hospitals WHERE hospital_id = $1")
            .bind(hospital_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Hospital not found"));
        }
        info!(hospital_id, "Hospital deleted");
        Ok(())
    }
}
