//! Axum adapter for the cookie-presence route gate in `evrs_gate`.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use evrs_gate::GateDecision;
use tracing::debug;

/// Redirects page requests according to which role cookies are present.
/// Only the path is replaced; the query string is carried over.
pub async fn route_gate(jar: CookieJar, request: Request, next: Next) -> Response {
    let decision = evrs_gate::gate(request.uri().path(), &jar);

    match decision {
        GateDecision::Pass => next.run(request).await,
        GateDecision::Redirect(location) => {
            let target = redirect_target(location, request.uri().query());
            debug!(from = %request.uri().path(), to = %target, "Route gate redirect");
            Redirect::temporary(&target).into_response()
        }
    }
}

fn redirect_target(location: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{location}?{query}"),
        _ => location.to_string(),
    }
}
