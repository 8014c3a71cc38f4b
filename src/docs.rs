use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

use evrs_auth::{Claims, Role};
use evrs_models::admins::{Admin, RegisterAdminDto};
use evrs_models::auth::{LoginRequest, LoginResponse, SessionResponse};
use evrs_models::hcps::{Designation, HcpResponse, HealthcareProvider, RegisterHcpDto, UpdateHcpDto};
use evrs_models::hospitals::{Hospital, HospitalResponse, RegisterHospitalDto, UpdateHospitalDto};
use evrs_models::mohs::{Moh, MohResponse, RegisterMohDto, UpdateMohDto};
use evrs_models::patients::{
    EmergencyContact, MedicalInfo, MedicalResponse, Patient, PatientResponse, PatientSummary,
    RegisterPatientDto, UpdateContactDto, UpdateMedicalDto, UpdatePatientDto,
};
use evrs_models::vaccinations::{
    AddVaccinationDto, CitizenVaccinations, UpdateVaccinationDto, VaccinationRecord,
    VaccinationResponse, VaccinationWithName,
};
use evrs_models::vaccines::{RegisterVaccineDto, UpdateVaccineDto, Vaccine, VaccineResponse};
use evrs_models::{
    ChangePasswordDto, MessageResponse, RecordedBy, RegisteredAccount, RegistrationResponse,
};

use crate::routes::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::session,
        crate::modules::accounts::controller::get_profile,
        crate::modules::accounts::controller::change_password,
        crate::modules::accounts::controller::update_contact,
        crate::modules::accounts::controller::update_medical,
        crate::modules::admins::controller::register_admin,
        crate::modules::admins::controller::get_admins,
        crate::modules::patients::controller::register_patient,
        crate::modules::patients::controller::get_patients,
        crate::modules::patients::controller::get_patient,
        crate::modules::patients::controller::update_patient,
        crate::modules::patients::controller::delete_patient,
        crate::modules::hospitals::controller::register_hospital,
        crate::modules::hospitals::controller::get_hospitals,
        crate::modules::hospitals::controller::get_hospital,
        crate::modules::hospitals::controller::update_hospital,
        crate::modules::hospitals::controller::delete_hospital,
        crate::modules::mohs::controller::register_moh,
        crate::modules::mohs::controller::get_mohs,
        crate::modules::mohs::controller::get_moh,
        crate::modules::mohs::controller::update_moh,
        crate::modules::mohs::controller::delete_moh,
        crate::modules::hcps::controller::register_hcp,
        crate::modules::hcps::controller::get_hcps,
        crate::modules::hcps::controller::get_hcp,
        crate::modules::hcps::controller::update_hcp,
        crate::modules::hcps::controller::delete_hcp,
        crate::modules::vaccines::controller::register_vaccine,
        crate::modules::vaccines::controller::get_vaccines,
        crate::modules::vaccines::controller::get_vaccine,
        crate::modules::vaccines::controller::update_vaccine,
        crate::modules::vaccines::controller::delete_vaccine,
        crate::modules::vaccinations::controller::add_vaccination,
        crate::modules::vaccinations::controller::get_vaccinations,
        crate::modules::vaccinations::controller::get_citizen_vaccinations,
        crate::modules::vaccinations::controller::get_own_vaccinations,
        crate::modules::vaccinations::controller::get_vaccination,
        crate::modules::vaccinations::controller::update_vaccination,
        crate::modules::vaccinations::controller::delete_vaccination,
    ),
    components(
        schemas(
            Role,
            Claims,
            HealthResponse,
            MessageResponse,
            RecordedBy,
            RegisteredAccount,
            RegistrationResponse,
            ChangePasswordDto,
            LoginRequest,
            LoginResponse,
            SessionResponse,
            Admin,
            RegisterAdminDto,
            Patient,
            PatientSummary,
            RegisterPatientDto,
            UpdatePatientDto,
            UpdateContactDto,
            EmergencyContact,
            UpdateMedicalDto,
            MedicalInfo,
            MedicalResponse,
            PatientResponse,
            Designation,
            HealthcareProvider,
            RegisterHcpDto,
            UpdateHcpDto,
            HcpResponse,
            Hospital,
            RegisterHospitalDto,
            UpdateHospitalDto,
            HospitalResponse,
            Moh,
            RegisterMohDto,
            UpdateMohDto,
            MohResponse,
            Vaccine,
            RegisterVaccineDto,
            UpdateVaccineDto,
            VaccineResponse,
            VaccinationRecord,
            VaccinationWithName,
            CitizenVaccinations,
            AddVaccinationDto,
            UpdateVaccinationDto,
            VaccinationResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Per-role login, logout and session checks"),
        (name = "Accounts", description = "Profile and password of the signed-in account"),
        (name = "Admins", description = "Admin accounts"),
        (name = "Patients", description = "Citizen registration and records"),
        (name = "Healthcare Providers", description = "Doctors, nurses and midwives"),
        (name = "Hospitals", description = "Hospital accounts"),
        (name = "MOH Offices", description = "Ministry of Health office accounts"),
        (name = "Vaccines", description = "Vaccine catalogue"),
        (name = "Vaccinations", description = "Vaccination records"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "EVRS API",
        version = "0.1.0",
        description = "Electronic vaccination record system. Every role signs in separately and \
                       holds its own `<role>_token` cookie; the token may also be sent as a bearer header.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            for role in Role::ALL {
                components.add_security_scheme(
                    format!("{role}_cookie"),
                    SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(role.cookie_name()))),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_schemes_for_every_role() {
        let doc = ApiDoc::openapi();
        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("bearer_auth"));
        for role in Role::ALL {
            assert!(schemes.contains_key(&format!("{role}_cookie")));
        }
    }

    #[test]
    fn test_login_path_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/auth/login/{role}"));
        assert!(doc.paths.paths.contains_key("/api/{scope}/vaccinations/{citizen_id}"));
    }
}
