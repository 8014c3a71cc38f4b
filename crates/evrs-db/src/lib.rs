//! # EVRS DB
//!
//! PostgreSQL pool initialisation and the embedded schema migrations.

use std::env;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

fn database_url() -> anyhow::Result<String> {
    env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

/// Connects to `DATABASE_URL` and applies pending migrations.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let url = database_url()?;
    let pool = pool_options()
        .connect(&url)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool).await?;
    tracing::info!("Database pool ready");
    Ok(pool)
}

/// Builds a pool that only connects on first use.
///
/// Routes that never touch storage (token verification, the route gate)
/// work against it without a running database.
pub fn init_lazy_pool(url: &str) -> anyhow::Result<PgPool> {
    pool_options()
        .connect_lazy(url)
        .context("Invalid database URL")
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}
