//! Citizens (patients) and their medical information.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use evrs_core::serde::{deserialize_optional_string, deserialize_string_list};

use crate::common::RecordedBy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub citizen_id: String,
    pub serial_number: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub district: String,
    pub division: String,
    pub guardian_nic: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Vec<String>,
    pub medical_conditions: Vec<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    #[sqlx(flatten)]
    pub recorded_by: RecordedBy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn medical(&self) -> MedicalInfo {
        let emergency_contact = match (&self.emergency_contact_name, &self.emergency_contact_phone)
        {
            (Some(name), Some(phone_number)) => Some(EmergencyContact {
                name: name.clone(),
                phone_number: phone_number.clone(),
            }),
            _ => None,
        };
        MedicalInfo {
            blood_type: self.blood_type.clone(),
            allergies: self.allergies.clone(),
            medical_conditions: self.medical_conditions.clone(),
            emergency_contact,
        }
    }
}

/// Identifying fields only; returned alongside vaccination histories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub citizen_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl From<Patient> for PatientSummary {
    fn from(patient: Patient) -> Self {
        Self {
            citizen_id: patient.citizen_id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            birth_date: patient.birth_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientDto {
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[validate(length(min = 1, message = "District is required"))]
    pub district: String,
    #[validate(length(min = 1, message = "Division is required"))]
    pub division: String,
    #[serde(alias = "guardianNIC")]
    #[validate(length(min = 1, message = "Guardian NIC is required"))]
    pub guardian_nic: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Admin edit of a patient. Absent or blank fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientDto {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub division: Option<String>,
    #[serde(
        default,
        alias = "guardianNIC",
        deserialize_with = "deserialize_optional_string"
    )]
    pub guardian_nic: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub address: Option<String>,
}

/// Citizen self-service contact details.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_contact_update"))]
pub struct UpdateContactDto {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub address: Option<String>,
}

fn validate_contact_update(dto: &UpdateContactDto) -> Result<(), ValidationError> {
    if dto.phone_number.is_none() && dto.address.is_none() {
        return Err(ValidationError::new("empty_update")
            .with_message("Provide at least one of: phoneNumber, address".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[validate(length(min = 1, message = "Emergency contact requires name & phoneNumber"))]
    pub name: String,
    #[validate(length(min = 1, message = "Emergency contact requires name & phoneNumber"))]
    pub phone_number: String,
}

/// Medical update. `allergies` and `medicalConditions` accept either an array
/// or a comma separated string.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_medical_update"))]
pub struct UpdateMedicalDto {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub blood_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    #[schema(value_type = Option<Vec<String>>)]
    pub allergies: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    #[schema(value_type = Option<Vec<String>>)]
    pub medical_conditions: Option<Vec<String>>,
    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContact>,
}

fn validate_medical_update(dto: &UpdateMedicalDto) -> Result<(), ValidationError> {
    if dto.blood_type.is_none()
        && dto.allergies.is_none()
        && dto.medical_conditions.is_none()
        && dto.emergency_contact.is_none()
    {
        return Err(ValidationError::new("empty_update").with_message(
            "Provide at least one of: bloodType, allergies, medicalConditions, emergencyContact"
                .into(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInfo {
    pub blood_type: Option<String>,
    pub allergies: Vec<String>,
    pub medical_conditions: Vec<String>,
    pub emergency_contact: Option<EmergencyContact>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MedicalResponse {
    pub message: String,
    pub medical: MedicalInfo,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PatientResponse {
    pub message: String,
    pub patient: Patient,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientFilterParams {
    /// Exact district
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub district: Option<String>,
    /// Case-insensitive substring of the division
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub division: Option<String>,
    /// Matches citizen id, names, district or division
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_accepts_legacy_guardian_key() {
        let dto: RegisterPatientDto = serde_json::from_str(
            r#"{"serialNumber":"S-1","firstName":"Nimal","lastName":"Perera",
                "birthDate":"2024-01-15","district":"Colombo","division":"Dehiwala",
                "guardianNIC":"901234567V"}"#,
        )
        .unwrap();
        assert_eq!(dto.guardian_nic, "901234567V");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let dto: RegisterPatientDto = serde_json::from_str(
            r#"{"serialNumber":"S-1","firstName":"","lastName":"Perera",
                "birthDate":"2024-01-15","district":"Colombo","division":"Dehiwala",
                "guardianNic":"901234567V"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_summary_omits_personal_details() {
        let now = Utc::now();
        let patient = Patient {
            citizen_id: "C1234567890".to_string(),
            serial_number: "S-1".to_string(),
            first_name: "Nimal".to_string(),
            last_name: "Perera".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            district: "Colombo".to_string(),
            division: "Dehiwala".to_string(),
            guardian_nic: "901234567V".to_string(),
            phone_number: Some("0771234567".to_string()),
            address: Some("12 Galle Road".to_string()),
            blood_type: None,
            allergies: vec!["dust".to_string()],
            medical_conditions: vec![],
            emergency_contact_name: None,
            emergency_contact_phone: None,
            recorded_by: RecordedBy {
                id: "H1234567890".to_string(),
                role: evrs_auth::Role::Hospital,
            },
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(PatientSummary::from(patient)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(json["citizenId"], "C1234567890");
        assert_eq!(json["birthDate"], "2024-01-15");
        assert!(json.get("guardianNic").is_none());
        assert!(json.get("allergies").is_none());
    }

    #[test]
    fn test_medical_update_needs_a_field() {
        let dto: UpdateMedicalDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdateMedicalDto = serde_json::from_str(r#"{"allergies":"dust, pollen"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(
            dto.allergies,
            Some(vec!["dust".to_string(), "pollen".to_string()])
        );
    }

    #[test]
    fn test_medical_update_checks_emergency_contact() {
        let dto: UpdateMedicalDto =
            serde_json::from_str(r#"{"emergencyContact":{"name":"Kamal","phoneNumber":""}}"#)
                .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_contact_update_needs_a_field() {
        let dto: UpdateContactDto = serde_json::from_str(r#"{"address":"  "}"#).unwrap();
        assert!(dto.validate().is_err());
        let dto: UpdateContactDto = serde_json::from_str(r#"{"phoneNumber":"0771234567"}"#).unwrap();
        assert!(dto.validate().is_ok());
    }
}
