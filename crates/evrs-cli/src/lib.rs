//! # EVRS CLI
//!
//! Operations that run outside the HTTP API: bootstrapping the first admin,
//! minting tokens for debugging and evaluating the frontend route gate.

use std::collections::HashMap;

use anyhow::{Context, bail};
use sqlx::PgPool;

use evrs_auth::{Role, TokenKeys};
use evrs_core::hash_password;
use evrs_core::ids::{ADMIN_PREFIX, generate_id};
use evrs_gate::GateDecision;

/// Inserts an admin with no `recorded_by`. Returns the generated admin id.
pub async fn create_admin(
    db: &PgPool,
    full_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<String> {
    if full_name.trim().is_empty() {
        bail!("Full name is required");
    }
    if !email.contains('@') {
        bail!("A valid email is required");
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;

    let admin_id = sqlx::query_scalar::<_, String>(
        "INSERT INTO admins (admin_id, full_name, email, password_hash)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING admin_id",
    )
    .bind(generate_id(ADMIN_PREFIX))
    .bind(full_name.trim())
    .bind(email.trim().to_lowercase())
    .bind(&password_hash)
    .fetch_optional(db)
    .await
    .context("Failed to insert admin")?;

    admin_id.ok_or_else(|| anyhow::anyhow!("Admin with this email already exists"))
}

pub fn issue_token(keys: &TokenKeys, role: &str, id: &str) -> anyhow::Result<String> {
    let role: Role = role.parse()?;
    Ok(keys.issue(role, id)?)
}

/// Gate decision as JSON for the given path and present cookie names.
pub fn gate_report(path: &str, cookie_names: &[String]) -> anyhow::Result<String> {
    let cookies: HashMap<String, String> = cookie_names
        .iter()
        .map(|name| (name.clone(), "present".to_string()))
        .collect();

    let decision: GateDecision = evrs_gate::gate(path, &cookies);
    Ok(serde_json::to_string(&decision)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evrs_config::JwtConfig;

    #[test]
    fn test_issue_token_round_trips() {
        let keys = TokenKeys::from_config(&JwtConfig::new("cli-test-secret"));
        let token = issue_token(&keys, "moh", "MOH1234567890").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.role, Role::Moh);
        assert_eq!(claims.id, "MOH1234567890");
    }

    #[test]
    fn test_issue_token_rejects_unknown_role() {
        let keys = TokenKeys::from_config(&JwtConfig::new("cli-test-secret"));
        assert!(issue_token(&keys, "pharmacist", "X1").is_err());
    }

    #[test]
    fn test_gate_report_redirect() {
        let report = gate_report("/admin", &[]).unwrap();
        assert!(report.contains("/admin/login"));
    }

    #[test]
    fn test_gate_report_logged_in_admin() {
        let report = gate_report("/admin/login", &["admin_token".to_string()]).unwrap();
        assert!(report.contains("/admin/dashboard"));
    }
}
