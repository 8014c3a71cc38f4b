//! Where tokens are read from.

use std::collections::HashMap;

use axum::http::{HeaderMap, header::AUTHORIZATION};
use axum_extra::extract::cookie::CookieJar;

/// Read-only view of the cookies on a request.
///
/// Empty values count as absent.
pub trait CookieSource {
    fn cookie(&self, name: &str) -> Option<&str>;
}

impl CookieSource for CookieJar {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.get(name).map(|c| c.value()).filter(|v| !v.is_empty())
    }
}

impl CookieSource for HashMap<String, String> {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }
}

/// Token from an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_cookie_jar_ignores_empty_values() {
        let jar = CookieJar::new()
            .add(Cookie::new("hcp_token", "t1"))
            .add(Cookie::new("moh_token", ""));
        assert_eq!(jar.cookie("hcp_token"), Some("t1"));
        assert_eq!(jar.cookie("moh_token"), None);
        assert_eq!(jar.cookie("admin_token"), None);
    }

    #[test]
    fn test_hash_map_source() {
        let mut cookies = HashMap::new();
        cookies.insert("citizen_token".to_string(), "t".to_string());
        assert_eq!(cookies.cookie("citizen_token"), Some("t"));
    }
}
