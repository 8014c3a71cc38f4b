use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use evrs_auth::{AuthError, Claims, Role, authorize};

/// Allowed-role set for [`require_roles`].
#[derive(Debug, Clone)]
pub struct AllowedRoles(Arc<[Role]>);

impl AllowedRoles {
    pub fn new(roles: &[Role]) -> Self {
        Self(Arc::from(roles))
    }

    pub fn only(role: Role) -> Self {
        Self::new(&[role])
    }

    pub fn roles(&self) -> &[Role] {
        &self.0
    }
}

/// Rejects with 403 unless a verifier has already attached claims whose role
/// is in the allowed set.
pub async fn require_roles(
    State(allowed): State<AllowedRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    authorize(req.extensions().get::<Claims>(), allowed.roles())?;
    Ok(next.run(req).await)
}
