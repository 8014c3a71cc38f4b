//! Operations shared by every account kind: credential checks, profiles and
//! password changes. Each role keeps its accounts in its own table.

use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use evrs_auth::Role;
use evrs_core::{AppError, hash_password, verify_password};
use evrs_models::ChangePasswordDto;

use crate::modules::admins::service::AdminService;
use crate::modules::hcps::service::HcpService;
use crate::modules::hospitals::service::HospitalService;
use crate::modules::mohs::service::MohService;
use crate::modules::patients::service::PatientService;

pub const MIN_PASSWORD_LEN: usize = 8;

const INVALID_CREDENTIALS: &str = "Invalid id or password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountTable {
    pub table: &'static str,
    pub id_column: &'static str,
}

pub fn account_table(role: Role) -> AccountTable {
    let (table, id_column) = match role {
        Role::Admin => ("admins", "admin_id"),
        Role::Citizen => ("patients", "citizen_id"),
        Role::Hcp => ("healthcare_providers", "hcp_id"),
        Role::Hospital => ("hospitals", "hospital_id"),
        Role::Moh => ("mohs", "moh_id"),
    };
    AccountTable { table, id_column }
}

pub struct AccountService;

impl AccountService {
    async fn password_hash(db: &PgPool, role: Role, id: &str) -> Result<Option<String>, AppError> {
        let AccountTable { table, id_column } = account_table(role);
        let hash = sqlx::query_scalar::<_, String>(&format!(
            "SELECT password_hash FROM {table} WHERE {id_column} = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(hash)
    }

    /// Checks the password and returns the account's public profile.
    /// Unknown ids and wrong passwords are indistinguishable to the caller.
    #[instrument(skip(db, password))]
    pub async fn authenticate(
        db: &PgPool,
        role: Role,
        id: &str,
        password: &str,
    ) -> Result<Value, AppError> {
        let Some(hash) = Self::password_hash(db, role, id).await? else {
            warn!(%role, id, "Login for unknown account");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(password, &hash)? {
            warn!(%role, id, "Login with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        Self::profile(db, role, id).await
    }

    #[instrument(skip(db))]
    pub async fn profile(db: &PgPool, role: Role, id: &str) -> Result<Value, AppError> {
        let profile = match role {
            Role::Admin => serde_json::to_value(AdminService::get(db, id).await?),
            Role::Citizen => serde_json::to_value(PatientService::get(db, id).await?),
            Role::Hcp => serde_json::to_value(HcpService::get(db, id).await?),
            Role::Hospital => serde_json::to_value(HospitalService::get(db, id).await?),
            Role::Moh => serde_json::to_value(MohService::get(db, id).await?),
        };
        Ok(profile?)
    }

    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        role: Role,
        id: &str,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let hash = Self::password_hash(db, role, id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        if !verify_password(&dto.current_password, &hash)? {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }
        if dto.new_password == dto.current_password {
            return Err(AppError::bad_request(
                "New password must be different from the current password",
            ));
        }
        if dto.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::bad_request(format!(
                "New password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let AccountTable { table, id_column } = account_table(role);
        sqlx::query(&format!(
            "UPDATE {table} SET password_hash = $2, updated_at = NOW() WHERE {id_column} = $1"
        ))
        .bind(id)
        .bind(hash_password(&dto.new_password)?)
        .execute(db)
        .await?;

        info!(%role, id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_its_own_table() {
        let tables: Vec<_> = Role::ALL.iter().map(|r| account_table(*r).table).collect();
        let mut unique = tables.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), tables.len());
    }

    #[test]
    fn test_citizens_live_in_patients() {
        assert_eq!(
            account_table(Role::Citizen),
            AccountTable {
                table: "patients",
                id_column: "citizen_id"
            }
        );
    }
}
