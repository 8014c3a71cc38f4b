use sqlx::PgPool;
use tracing::{info, instrument};

use evrs_core::AppError;
use evrs_core::ids::{VACCINATION_PREFIX, generate_id};
use evrs_models::RecordedBy;
use evrs_models::common::like_pattern;
use evrs_models::vaccinations::{
    AddVaccinationDto, CitizenVaccinations, UNKNOWN_VACCINE, UpdateVaccinationDto,
    VaccinationFilterParams, VaccinationRecord, VaccinationWithName,
};

use crate::modules::patients::service::PatientService;

const RECORD_COLUMNS: &str = "vaccination_id, citizen_id, vaccine_id, batch_number, expiry_date, \
     vaccination_location, division, additional_notes, recorded_by_id, recorded_by_role, \
     created_at, updated_at";

const NOT_FOUND: &str = "Vaccination record not found";

pub struct VaccinationService;

impl VaccinationService {
    /// Records a vaccination for an existing citizen and vaccine.
    #[instrument(skip(db, dto), fields(db.table = "vaccination_records", citizen_id = %dto.citizen_id))]
    pub async fn add(
        db: &PgPool,
        dto: AddVaccinationDto,
        recorded_by: &RecordedBy,
    ) -> Result<VaccinationRecord, AppError> {
        if PatientService::find(db, &dto.citizen_id).await?.is_none() {
            return Err(AppError::not_found("Patient not found"));
        }
        Self::ensure_vaccine_exists(db, &dto.vaccine_id).await?;

        let record = sqlx::query_as::<_, VaccinationRecord>(&format!(
            "INSERT INTO vaccination_records (vaccination_id, citizen_id, vaccine_id, batch_number,
                 expiry_date, vaccination_location, division, additional_notes,
                 recorded_by_id, recorded_by_role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(generate_id(VACCINATION_PREFIX))
        .bind(&dto.citizen_id)
        .bind(&dto.vaccine_id)
        .bind(&dto.batch_number)
        .bind(dto.expiry_date)
        .bind(&dto.vaccination_location)
        .bind(&dto.division)
        .bind(&dto.additional_notes)
        .bind(&recorded_by.id)
        .bind(recorded_by.role.as_str())
        .fetch_one(db)
        .await?;

        info!(
            vaccination_id = %record.vaccination_id,
            recorded_by = %recorded_by.id,
            "Vaccination recorded"
        );
        Ok(record)
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: VaccinationFilterParams,
    ) -> Result<Vec<VaccinationRecord>, AppError> {
        let records = sqlx::query_as::<_, VaccinationRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM vaccination_records
             WHERE ($1::text IS NULL OR vaccination_location = $1)
               AND ($2::text IS NULL
                    OR citizen_id ILIKE $2
                    OR division ILIKE $2
                    OR vaccine_id ILIKE $2
                    OR recorded_by_id ILIKE $2)
             ORDER BY created_at DESC"
        ))
        .bind(filters.location)
        .bind(filters.search.as_deref().map(like_pattern))
        .fetch_all(db)
        .await?;
        Ok(records)
    }

    /// The citizen with every record, newest first. `records` may be empty.
    #[instrument(skip(db))]
    pub async fn for_citizen(
        db: &PgPool,
        citizen_id: &str,
    ) -> Result<CitizenVaccinations, AppError> {
        let patient = PatientService::get(db, citizen_id).await?;

        let records = sqlx::query_as::<_, VaccinationWithName>(
            "SELECT vr.vaccination_id, vr.citizen_id, vr.vaccine_id, vr.batch_number,
                    vr.expiry_date, vr.vaccination_location, vr.division, vr.additional_notes,
                    vr.recorded_by_id, vr.recorded_by_role, vr.created_at, vr.updated_at,
                    COALESCE(v.name, $2) AS vaccine_name
             FROM vaccination_records vr
             LEFT JOIN vaccines v ON v.vaccine_id = vr.vaccine_id
             WHERE vr.citizen_id = $1
             ORDER BY vr.created_at DESC",
        )
        .bind(citizen_id)
        .bind(UNKNOWN_VACCINE)
        .fetch_all(db)
        .await?;

        Ok(CitizenVaccinations {
            patient: patient.into(),
            records,
        })
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, vaccination_id: &str) -> Result<VaccinationRecord, AppError> {
        sqlx::query_as::<_, VaccinationRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM vaccination_records WHERE vaccination_id = $1"
        ))
        .bind(vaccination_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        vaccination_id: &str,
        dto: UpdateVaccinationDto,
    ) -> Result<VaccinationRecord, AppError> {
        if let Some(vaccine_id) = dto.vaccine_id.as_deref() {
            Self::ensure_vaccine_exists(db, vaccine_id).await?;
        }

        sqlx::query_as::<_, VaccinationRecord>(&format!(
            "UPDATE vaccination_records SET
                 vaccine_id = COALESCE($2, vaccine_id),
                 batch_number = COALESCE($3, batch_number),
                 expiry_date = COALESCE($4, expiry_date),
                 vaccination_location = COALESCE($5, vaccination_location),
                 division = COALESCE($6, division),
                 additional_notes = COALESCE($7, additional_notes),
                 updated_at = NOW()
             WHERE vaccination_id = $1
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(vaccination_id)
        .bind(dto.vaccine_id)
        .bind(dto.batch_number)
        .bind(dto.expiry_date)
        .bind(dto.vaccination_location)
        .bind(dto.division)
        .bind(dto.additional_notes)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, vaccination_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vaccination_records WHERE vaccination_id = $1")
            .bind(vaccination_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(NOT_FOUND));
        }
        info!(vaccination_id, "Vaccination record deleted");
        Ok(())
    }

    async fn ensure_vaccine_exists(db: &PgPool, vaccine_id: &str) -> Result<(), AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM vaccines WHERE vaccine_id = $1)")
                .bind(vaccine_id)
                .fetch_one(db)
                .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found("Vaccine not found"))
        }
    }
}
