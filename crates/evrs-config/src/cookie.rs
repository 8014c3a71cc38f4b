//! Attributes shared by all `<role>_token` cookies.

use crate::jwt::JwtConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    /// `Secure` is only set in production so local http development keeps working.
    pub secure: bool,
    pub domain: Option<String>,
    /// `Max-Age` in seconds, equal to the token lifetime.
    pub max_age: i64,
}

impl CookieConfig {
    pub fn from_env(jwt: &JwtConfig) -> Self {
        let app_env = crate::env_opt("APP_ENV").unwrap_or_else(|| "development".to_string());
        Self {
            secure: is_production(&app_env),
            domain: crate::env_opt("COOKIE_DOMAIN"),
            max_age: jwt.expiry,
        }
    }

    pub fn for_jwt(jwt: &JwtConfig) -> Self {
        Self {
            secure: false,
            domain: None,
            max_age: jwt.expiry,
        }
    }
}

fn is_production(app_env: &str) -> bool {
    app_env.eq_ignore_ascii_case("production")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_production() {
        assert!(is_production("production"));
        assert!(is_production("PRODUCTION"));
        assert!(!is_production("development"));
        assert!(!is_production("staging"));
    }

    #[test]
    fn test_max_age_follows_token_expiry() {
        let mut jwt = JwtConfig::new("s");
        jwt.expiry = 120;
        let cookie = CookieConfig::for_jwt(&jwt);
        assert_eq!(cookie.max_age, 120);
        assert!(!cookie.secure);
    }
}
