//! The three authorization decisions.
//!
//! * [`verify_role`] guards a route family owned by one role.
//! * [`verify_any`] accepts whichever non-admin role cookie comes first.
//! * [`authorize`] checks verified claims against an allowed-role set.
//!
//! They are plain functions over a [`CookieSource`] and an optional bearer
//! token so the axum middleware, the extractors and the tests share them.

use crate::claims::Claims;
use crate::credentials::CookieSource;
use crate::error::AuthError;
use crate::keys::TokenKeys;
use crate::role::Role;

pub fn verify_role<C>(
    keys: &TokenKeys,
    cookies: &C,
    bearer: Option<&str>,
    role: Role,
) -> Result<Claims, AuthError>
where
    C: CookieSource + ?Sized,
{
    let token = cookies
        .cookie(role.cookie_name())
        .or(bearer)
        .ok_or(AuthError::Unauthenticated)?;

    let claims = keys.verify(token)?;
    if claims.role != role {
        return Err(AuthError::RoleMismatch {
            expected: role,
            actual: claims.role,
        });
    }
    Ok(claims)
}

pub fn verify_any<C>(
    keys: &TokenKeys,
    cookies: &C,
    bearer: Option<&str>,
) -> Result<Claims, AuthError>
where
    C: CookieSource + ?Sized,
{
    let token = Role::NON_ADMIN
        .iter()
        .find_map(|role| cookies.cookie(role.cookie_name()))
        .or(bearer)
        .ok_or(AuthError::Unauthenticated)?;

    keys.verify(token)
}

pub fn authorize(claims: Option<&Claims>, allowed: &[Role]) -> Result<(), AuthError> {
    match claims {
        Some(claims) if allowed.contains(&claims.role) => Ok(()),
        _ => Err(AuthError::Forbidden),
    }
}
