use std::sync::Arc;

use sqlx::PgPool;

use evrs_auth::TokenKeys;
use evrs_config::{CookieConfig, CorsConfig, JwtConfig, ServerConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub keys: Arc<TokenKeys>,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: &JwtConfig) -> Self {
        Self {
            db,
            keys: Arc::new(TokenKeys::from_config(jwt_config)),
            cookie_config: CookieConfig::for_jwt(jwt_config),
            cors_config: CorsConfig::from_env(),
            server_config: ServerConfig::default(),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_dev_secret() {
        tracing::warn!("JWT_SECRET is not set, using the development secret");
    }

    Ok(AppState {
        db: evrs_db::init_db_pool().await?,
        keys: Arc::new(TokenKeys::from_config(&jwt_config)),
        cookie_config: CookieConfig::from_env(&jwt_config),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
    })
}
