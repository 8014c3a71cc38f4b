use sqlx::PgPool;
use tracing::{debug, info, instrument};

use evrs_auth::Role;
use evrs_core::ids::{CITIZEN_PREFIX, generate_id, generate_password};
use evrs_core::{AppError, hash_password};
use evrs_models::common::like_pattern;
use evrs_models::patients::{
    MedicalInfo, Patient, PatientFilterParams, RegisterPatientDto, UpdateContactDto,
    UpdateMedicalDto, UpdatePatientDto,
};
use evrs_models::{RecordedBy, RegisteredAccount};

pub(crate) const PATIENT_COLUMNS: &str = "citizen_id, serial_number, first_name, last_name, \
     birth_date, district, division, guardian_nic, phone_number, address, blood_type, allergies, \
     medical_conditions, emergency_contact_name, emergency_contact_phone, recorded_by_id, \
     recorded_by_role, created_at, updated_at";

pub struct PatientService;

impl PatientService {
    #[instrument(skip(db, dto), fields(db.table = "patients", recorded_by = %recorded_by.id))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterPatientDto,
        recorded_by: &RecordedBy,
    ) -> Result<RegisteredAccount, AppError> {
        let citizen_id = generate_id(CITIZEN_PREFIX);
        let password = generate_password();
        let password_hash = hash_password(&password)?;

        let patient = sqlx::query_as::<_, Patient>(&format!(
            "INSERT INTO patients (citizen_id, serial_number, first_name, last_name, birth_date,
                 district, division, guardian_nic, phone_number, address, password_hash,
                 recorded_by_id, recorded_by_role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(&citizen_id)
        .bind(&dto.serial_number)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.birth_date)
        .bind(&dto.district)
        .bind(&dto.division)
        .bind(&dto.guardian_nic)
        .bind(&dto.phone_number)
        .bind(&dto.address)
        .bind(&password_hash)
        .bind(&recorded_by.id)
        .bind(recorded_by.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| {
            AppError::conflict_on_unique(e, "Patient with this serial number already exists")
        })?;

        info!(citizen_id = %patient.citizen_id, "Patient registered");

        Ok(RegisteredAccount {
            id: patient.citizen_id.clone(),
            role: Role::Citizen,
            name: patient.full_name(),
            password,
        })
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, filters: PatientFilterParams) -> Result<Vec<Patient>, AppError> {
        let patients = sqlx::query_as::<_, Patient>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients
             WHERE ($1::text IS NULL OR district = $1)
               AND ($2::text IS NULL OR division ILIKE $2)
               AND ($3::text IS NULL
                    OR citizen_id ILIKE $3
                    OR first_name ILIKE $3
                    OR last_name ILIKE $3
                    OR district ILIKE $3
                    OR division ILIKE $3)
             ORDER BY created_at DESC"
        ))
        .bind(filters.district)
        .bind(filters.division.as_deref().map(like_pattern))
        .bind(filters.search.as_deref().map(like_pattern))
        .fetch_all(db)
        .await?;

        debug!(count = patients.len(), "Fetched patients");
        Ok(patients)
    }

    #[instrument(skip(db))]
    pub async fn find(db: &PgPool, citizen_id: &str) -> Result<Option<Patient>, AppError> {
        let patient = sqlx::query_as::<_, Patient>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE citizen_id = $1"
        ))
        .bind(citizen_id)
        .fetch_optional(db)
        .await?;
        Ok(patient)
    }

    pub async fn get(db: &PgPool, citizen_id: &str) -> Result<Patient, AppError> {
        Self::find(db, citizen_id)
            .await?
            .ok_or_else(|| AppError::not_found("Patient not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        citizen_id: &str,
        dto: UpdatePatientDto,
    ) -> Result<Patient, AppError> {
        sqlx::query_as::<_, Patient>(&format!(
            "UPDATE patients SET
                 first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 birth_date = COALESCE($4, birth_date),
                 district = COALESCE($5, district),
                 division = COALESCE($6, division),
                 guardian_nic = COALESCE($7, guardian_nic),
                 phone_number = COALESCE($8, phone_number),
                 address = COALESCE($9, address),
                 updated_at = NOW()
             WHERE citizen_id = $1
             RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(citizen_id)
        .bind(dto.first_name)
        .bind(dto.last_name)
        .bind(dto.birth_date)
        .bind(dto.district)
        .bind(dto.division)
        .bind(dto.guardian_nic)
        .bind(dto.phone_number)
        .bind(dto.address)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Patient not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_contact(
        db: &PgPool,
        citizen_id: &str,
        dto: UpdateContactDto,
    ) -> Result<Patient, AppError> {
        sqlx::query_as::<_, Patient>(&format!(
            "UPDATE patients SET
                 phone_number = COALESCE($2, phone_number),
                 address = COALESCE($3, address),
                 updated_at = NOW()
             WHERE citizen_id = $1
             RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(citizen_id)
        .bind(dto.phone_number)
        .bind(dto.address)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Citizen not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_medical(
        db: &PgPool,
        citizen_id: &str,
        dto: UpdateMedicalDto,
    ) -> Result<MedicalInfo, AppError> {
        let (contact_name, contact_phone) = dto
            .emergency_contact
            .map(|c| (Some(c.name), Some(c.phone_number)))
            .unwrap_or((None, None));

        let patient = sqlx::query_as::<_, Patient>(&format!(
            "UPDATE patients SET
                 blood_type = COALESCE($2, blood_type),
                 allergies = COALESCE($3, allergies),
                 medical_conditions = COALESCE($4, medical_conditions),
                 emergency_contact_name = COALESCE($5, emergency_contact_name),
                 emergency_contact_phone = COALESCE($6, emergency_contact_phone),
                 updated_at = NOW()
             WHERE citizen_id = $1
             RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(citizen_id)
        .bind(dto.blood_type)
        .bind(dto.allergies)
        .bind(dto.medical_conditions)
        .bind(contact_name)
        .bind(contact_phone)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Citizen not found"))?;

        Ok(patient.medical())
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, citizen_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM patients WHERE citizen_id = $1")
            .bind(citizen_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Patient not found"));
        }
        info!(citizen_id, "Patient deleted");
        Ok(())
    }
}
