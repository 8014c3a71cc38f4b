//! Token signing and verification.
//!
//! [`TokenKeys`] is built once at startup from [`JwtConfig`] and shared behind
//! an `Arc`. It is never mutated afterwards.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use evrs_config::JwtConfig;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::role::Role;

pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry: i64,
}

impl TokenKeys {
    pub fn from_config(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway;

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiry: config.expiry,
        }
    }

    /// Token lifetime in seconds; also the cookie `Max-Age`.
    pub fn expiry(&self) -> i64 {
        self.expiry
    }

    pub fn issue(&self, role: Role, id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            id: id.to_string(),
            role,
            iat: now,
            exp: now.saturating_add(usize::try_from(self.expiry).unwrap_or(0)),
        };
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }

    /// Checks signature and expiry. Every failure is reported as
    /// [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}
