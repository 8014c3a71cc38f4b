//! # EVRS Gate
//!
//! Edge redirects for the frontend pages. The gate only looks at which
//! `<role>_token` cookies are present; it never verifies them. The API
//! verifiers remain the trust boundary, so a forged cookie gets a page shell
//! and nothing else.
//!
//! [`gate`] is the entry point used by the server: paths outside the
//! frontend matcher always pass, everything else goes through [`evaluate`].
//!
//! ```
//! use std::collections::HashMap;
//! use evrs_gate::{GateDecision, gate};
//!
//! let cookies: HashMap<String, String> = HashMap::new();
//! assert_eq!(gate("/admin", &cookies), GateDecision::Redirect("/admin/login"));
//! assert_eq!(gate("/", &cookies), GateDecision::Pass);
//! ```

mod routes;

pub use routes::{ROLE_PAGES, RolePages};

use serde::Serialize;

use evrs_auth::{CookieSource, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "location", rename_all = "lowercase")]
pub enum GateDecision {
    Pass,
    Redirect(&'static str),
}

/// Prefixes whose pages the frontend deployment routes through the gate.
const MATCHED_PREFIXES: [&str; 5] = [
    "/admin",
    "/moh",
    "/healthcare-provider",
    "/hospital",
    "/dashboard",
];

/// Whether `path` is one the gate is deployed in front of.
///
/// Covers each matched prefix and anything below it, plus the citizen login.
pub fn matches(path: &str) -> bool {
    if path == "/login" {
        return true;
    }
    MATCHED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Gate decision for a request. Paths outside [`matches`] always pass.
pub fn gate<C>(path: &str, cookies: &C) -> GateDecision
where
    C: CookieSource + ?Sized,
{
    if matches(path) {
        evaluate(path, cookies)
    } else {
        GateDecision::Pass
    }
}

/// Applies the redirect rules in order; the first that fires wins.
///
/// 1. a bare role base path goes to that role's login page
/// 2. a login page with that role's cookie goes to its dashboard
/// 3. `/` and the login pages are public
/// 4. a protected prefix without that role's cookie goes to its login page
/// 5. anything else passes
///
/// Rule 4 is a plain string prefix test, so `/administrator` counts as an
/// admin page here. [`gate`] keeps such paths away via [`matches`].
pub fn evaluate<C>(path: &str, cookies: &C) -> GateDecision
where
    C: CookieSource + ?Sized,
{
    let present = |role: Role| cookies.cookie(role.cookie_name()).is_some();

    if let Some(pages) = ROLE_PAGES.iter().find(|p| p.base == Some(path)) {
        return GateDecision::Redirect(pages.login);
    }

    if let Some(pages) = ROLE_PAGES.iter().find(|p| p.login == path) {
        if present(pages.role) {
            return GateDecision::Redirect(pages.dashboard);
        }
    }

    if is_public(path) {
        return GateDecision::Pass;
    }

    if let Some(pages) = ROLE_PAGES
        .iter()
        .find(|p| path.starts_with(p.protected_prefix))
    {
        if !present(pages.role) {
            return GateDecision::Redirect(pages.login);
        }
    }

    GateDecision::Pass
}

fn is_public(path: &str) -> bool {
    path == "/" || ROLE_PAGES.iter().any(|p| p.login == path)
}
