use sqlx::PgPool;
use tracing::{info, instrument};

use evrs_core::AppError;
use evrs_core::ids::{VACCINE_PREFIX, generate_id};
use evrs_models::RecordedBy;
use evrs_models::common::like_pattern;
use evrs_models::vaccines::{RegisterVaccineDto, UpdateVaccineDto, Vaccine};

const VACCINE_COLUMNS: &str =
    "vaccine_id, name, side_effects, recorded_by_id, recorded_by_role, created_at, updated_at";

const DUPLICATE: &str = "Vaccine with this name already exists";

pub struct VaccineService;

impl VaccineService {
    #[instrument(skip(db, dto), fields(db.table = "vaccines"))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterVaccineDto,
        recorded_by: &RecordedBy,
    ) -> Result<Vaccine, AppError> {
        let vaccine = sqlx::query_as::<_, Vaccine>(&format!(
            "INSERT INTO vaccines (vaccine_id, name, side_effects, recorded_by_id, recorded_by_role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {VACCINE_COLUMNS}"
        ))
        .bind(generate_id(VACCINE_PREFIX))
        .bind(dto.name.trim())
        .bind(&dto.side_effects)
        .bind(&recorded_by.id)
        .bind(recorded_by.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))?;

        info!(vaccine_id = %vaccine.vaccine_id, name = %vaccine.name, "Vaccine registered");
        Ok(vaccine)
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, search: Option<String>) -> Result<Vec<Vaccine>, AppError> {
        let vaccines = sqlx::query_as::<_, Vaccine>(&format!(
            "SELECT {VACCINE_COLUMNS} FROM vaccines
             WHERE ($1::text IS NULL OR vaccine_id ILIKE $1 OR name ILIKE $1)
             ORDER BY name ASC"
        ))
        .bind(search.as_deref().map(like_pattern))
        .fetch_all(db)
        .await?;
        Ok(vaccines)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, vaccine_id: &str) -> Result<Vaccine, AppError> {
        sqlx::query_as::<_, Vaccine>(&format!(
            "SELECT {VACCINE_COLUMNS} FROM vaccines WHERE vaccine_id = $1"
        ))
        .bind(vaccine_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Vaccine not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        vaccine_id: &str,
        dto: UpdateVaccineDto,
    ) -> Result<Vaccine, AppError> {
        sqlx::query_as::<_, Vaccine>(&format!(
            "UPDATE vaccines SET
                 name = COALESCE($2, name),
                 side_effects = COALESCE($3, side_effects),
                 updated_at = NOW()
             WHERE vaccine_id = $1
             RETURNING {VACCINE_COLUMNS}"
        ))
        .bind(vaccine_id)
        .bind(dto.name)
        .bind(dto.side_effects)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE))?
        .ok_or_else(|| AppError::not_found("Vaccine not found"))
    }

    /// Records that reference the vaccine are kept and later shown as "Unknown".
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, vaccine_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vaccines WHERE vaccine_id = $1")
            .bind(vaccine_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Vaccine not found"));
        }
        info!(vaccine_id, "Vaccine deleted");
        Ok(())
    }
}
