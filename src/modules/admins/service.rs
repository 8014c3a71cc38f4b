use sqlx::PgPool;
use tracing::{info, instrument};

use evrs_auth::Role;
use evrs_core::ids::{ADMIN_PREFIX, generate_id, generate_password};
use evrs_core::{AppError, hash_password};
use evrs_models::admins::{Admin, RegisterAdminDto};
use evrs_models::{RecordedBy, RegisteredAccount};

const ADMIN_COLUMNS: &str =
    "admin_id, full_name, email, recorded_by_id, recorded_by_role, created_at, updated_at";

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db, dto), fields(db.table = "admins"))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterAdminDto,
        recorded_by: &RecordedBy,
    ) -> Result<RegisteredAccount, AppError> {
        let password = generate_password();
        let password_hash = hash_password(&password)?;

        let admin = sqlx::query_as::<_, Admin>(&format!(
            "INSERT INTO admins (admin_id, full_name, email, password_hash,
                 recorded_by_id, recorded_by_role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(generate_id(ADMIN_PREFIX))
        .bind(&dto.full_name)
        .bind(dto.email.to_lowercase())
        .bind(&password_hash)
        .bind(&recorded_by.id)
        .bind(recorded_by.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Admin with this email already exists"))?;

        info!(admin_id = %admin.admin_id, "Admin registered");

        Ok(RegisteredAccount {
            id: admin.admin_id,
            role: Role::Admin,
            name: admin.full_name,
            password,
        })
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<Admin>, AppError> {
        let admins = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(admins)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, admin_id: &str) -> Result<Admin, AppError> {
        sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE admin_id = $1"
        ))
        .bind(admin_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Admin not found"))
    }
}
