use std::env;

/// Seven days, the lifetime of every role token.
pub const DEFAULT_EXPIRY_SECS: i64 = 604_800;

const DEV_SECRET: &str = "evrs-dev-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub expiry: i64,
    /// Accepted clock skew in seconds when checking `exp`.
    pub leeway: u64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string()),
            expiry: crate::env_or("JWT_EXPIRY", DEFAULT_EXPIRY_SECS),
            leeway: crate::env_or("JWT_LEEWAY", 0),
        }
    }

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry: DEFAULT_EXPIRY_SECS,
            leeway: 0,
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}
