//! Vaccination records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use evrs_core::serde::deserialize_optional_string;

use crate::common::RecordedBy;
use crate::patients::PatientSummary;

/// Shown as the vaccine name when a record points at a deleted vaccine.
pub const UNKNOWN_VACCINE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    pub vaccination_id: String,
    pub citizen_id: String,
    pub vaccine_id: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub vaccination_location: String,
    pub division: String,
    pub additional_notes: String,
    #[sqlx(flatten)]
    pub recorded_by: RecordedBy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A record joined with the name of its vaccine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationWithName {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: VaccinationRecord,
    pub vaccine_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CitizenVaccinations {
    pub patient: PatientSummary,
    pub records: Vec<VaccinationWithName>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddVaccinationDto {
    #[validate(length(min = 1, message = "Citizen id is required"))]
    pub citizen_id: String,
    #[validate(length(min = 1, message = "Vaccine id is required"))]
    pub vaccine_id: String,
    #[validate(length(min = 1, message = "Batch number is required"))]
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    #[validate(length(min = 1, message = "Vaccination location is required"))]
    pub vaccination_location: String,
    #[validate(length(min = 1, message = "Division is required"))]
    pub division: String,
    #[serde(default)]
    pub additional_notes: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVaccinationDto {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub vaccine_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub vaccination_location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub division: Option<String>,
    /// Present (even empty) replaces the notes.
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VaccinationResponse {
    pub message: String,
    pub record: VaccinationRecord,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VaccinationFilterParams {
    /// Exact vaccination location
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub location: Option<String>,
    /// Matches citizen id, division, vaccine id or recorder id
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use evrs_auth::Role;

    #[test]
    fn test_add_vaccination_defaults_notes() {
        let dto: AddVaccinationDto = serde_json::from_str(
            r#"{"citizenId":"C1234567890","vaccineId":"VAC1234567890","batchNumber":"B-7",
                "expiryDate":"2027-06-30","vaccinationLocation":"Colombo General",
                "division":"Borella"}"#,
        )
        .unwrap();
        assert_eq!(dto.additional_notes, "");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_add_vaccination_ignores_recorded_by_in_body() {
        let dto: AddVaccinationDto = serde_json::from_str(
            r#"{"citizenId":"C1","vaccineId":"VAC1","batchNumber":"B","expiryDate":"2027-06-30",
                "vaccinationLocation":"L","division":"D",
                "recordedBy":{"id":"A0000000001","role":"admin"}}"#,
        )
        .unwrap();
        assert_eq!(dto.citizen_id, "C1");
    }

    #[test]
    fn test_record_with_name_serializes_flat() {
        let now = Utc::now();
        let record = VaccinationWithName {
            record: VaccinationRecord {
                vaccination_id: "VR1234567890".to_string(),
                citizen_id: "C1234567890".to_string(),
                vaccine_id: "VAC1234567890".to_string(),
                batch_number: "B".to_string(),
                expiry_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
                vaccination_location: "L".to_string(),
                division: "D".to_string(),
                additional_notes: String::new(),
                recorded_by: RecordedBy {
                    id: "HCP1234567890".to_string(),
                    role: Role::Hcp,
                },
                created_at: now,
                updated_at: now,
            },
            vaccine_name: UNKNOWN_VACCINE.to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["vaccinationId"], "VR1234567890");
        assert_eq!(json["vaccineName"], "Unknown");
        assert_eq!(json["recordedBy"]["role"], "hcp");
    }
}
