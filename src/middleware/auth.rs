use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use evrs_auth::{AuthError, Claims, Role, TokenKeys, bearer_token, verify_any, verify_role};

use crate::metrics;

/// Which tokens a [`Verifier`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only `<role>_token` (or a bearer token) for this role.
    Role(Role),
    /// The first non-admin role cookie present, or a bearer token.
    AnyNonAdmin,
}

impl Scope {
    fn label(self) -> &'static str {
        match self {
            Scope::Role(role) => role.as_str(),
            Scope::AnyNonAdmin => "any",
        }
    }
}

/// State for [`verify_token`]: the shared keys plus the accepted scope.
#[derive(Debug, Clone)]
pub struct Verifier {
    keys: Arc<TokenKeys>,
    scope: Scope,
}

impl Verifier {
    pub fn for_role(keys: Arc<TokenKeys>, role: Role) -> Self {
        Self {
            keys,
            scope: Scope::Role(role),
        }
    }

    pub fn any(keys: Arc<TokenKeys>) -> Self {
        Self {
            keys,
            scope: Scope::AnyNonAdmin,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn check(&self, jar: &CookieJar, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let bearer = bearer_token(headers);
        match self.scope {
            Scope::Role(role) => verify_role(&self.keys, jar, bearer, role),
            Scope::AnyNonAdmin => verify_any(&self.keys, jar, bearer),
        }
    }
}

/// Verifies the request token and stores the [`Claims`] in the request extensions.
pub async fn verify_token(
    State(verifier): State<Verifier>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = verifier.check(&jar, req.headers()).inspect_err(|e| {
        tracing::debug!(scope = verifier.scope.label(), reason = e.reason(), "Request rejected");
        metrics::track_token_rejected(verifier.scope.label(), e);
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Claims placed on the request by [`verify_token`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::Unauthenticated)
    }
}
