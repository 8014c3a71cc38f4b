mod common;

use axum::http::{StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

use common::{
    body_json, expired_token, get, get_with_cookies, json_request, sample_id, test_app, token,
    token_with_secret,
};
use evrs::evrs_auth::Role;

fn session_uri(role: Role) -> String {
    format!("/api/auth/get/{role}")
}

#[tokio::test]
async fn test_missing_token_is_401_for_every_role() {
    for role in Role::ALL {
        let response = test_app().oneshot(get(&session_uri(role))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "role {role}");
        assert_eq!(body_json(response).await["message"], "Not authenticated");
    }
}

#[tokio::test]
async fn test_empty_cookie_counts_as_missing() {
    let response = test_app()
        .oneshot(get_with_cookies("/api/auth/get/citizen", &[("citizen_token", "")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_403_for_every_role() {
    for role in Role::ALL {
        let expired = expired_token(role, &sample_id(role));
        let response = test_app()
            .oneshot(get_with_cookies(
                &session_uri(role),
                &[(role.cookie_name(), expired.as_str())],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "role {role}");
        assert_eq!(body_json(response).await["message"], "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_foreign_signature_is_403() {
    let forged = token_with_secret(Role::Admin, "A0000000001", "some-other-secret");
    let response = test_app()
        .oneshot(get_with_cookies("/api/auth/get/admin", &[("admin_token", forged.as_str())]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_for_another_role_is_403() {
    for role in Role::ALL {
        for other in Role::ALL.into_iter().filter(|r| *r != role) {
            let foreign = token(other, &sample_id(other));
            // Presented under the expected cookie name, so only the embedded role is wrong.
            let response = test_app()
                .oneshot(get_with_cookies(
                    &session_uri(role),
                    &[(role.cookie_name(), foreign.as_str())],
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{other} on {role}");
            assert_eq!(
                body_json(response).await["message"],
                format!("Token is not valid for the {role} role")
            );
        }
    }
}

#[tokio::test]
async fn test_valid_token_attaches_claims_for_every_role() {
    for role in Role::ALL {
        let id = sample_id(role);
        let valid = token(role, &id);
        let response = test_app()
            .oneshot(get_with_cookies(
                &session_uri(role),
                &[(role.cookie_name(), valid.as_str())],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "role {role}");

        let body = body_json(response).await;
        assert_eq!(body["loggedIn"], true);
        assert_eq!(body["claims"]["role"], role.as_str());
        assert_eq!(body["claims"]["id"], id);
    }
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let valid = token(Role::Moh, "MOH0000000001");
    let request = axum::http::Request::builder()
        .uri("/api/auth/get/moh")
        .header(header::AUTHORIZATION, format!("Bearer {valid}"))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cookie_wins_over_bearer() {
    let cookie = token(Role::Hcp, "HCP0000000001");
    let bearer = token_with_secret(Role::Hcp, "HCP0000000002", "some-other-secret");
    let request = axum::http::Request::builder()
        .uri("/api/auth/get/hcp")
        .header("cookie", format!("hcp_token={cookie}"))
        .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["claims"]["id"], "HCP0000000001");
}

#[tokio::test]
async fn test_protected_scope_rejects_without_token() {
    for uri in [
        "/api/admin/admins",
        "/api/hcp/vaccines",
        "/api/hospital/vaccines",
        "/api/moh/vaccines",
        "/api/citizen/get/profile",
        "/api/shared/vaccines",
    ] {
        let response = test_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_provider_token_cannot_reach_admin_scope() {
    let hospital = token(Role::Hospital, "H0000000001");
    let response = test_app()
        .oneshot(get_with_cookies("/api/admin/admins", &[("admin_token", hospital.as_str())]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_hcp_has_no_patient_registration() {
    let hcp = token(Role::Hcp, "HCP0000000001");
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/hcp/register-patient",
            json!({}),
            &[("hcp_token", hcp.as_str())],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_citizen_cannot_read_another_citizens_records() {
    let citizen = token(Role::Citizen, "C0000000001");
    let response = test_app()
        .oneshot(get_with_cookies(
            "/api/citizen/vaccinations/C0000000002",
            &[("citizen_token", citizen.as_str())],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["message"], "Forbidden");
}

#[tokio::test]
async fn test_body_validation_runs_after_authentication() {
    let admin = token(Role::Admin, "A0000000001");

    let missing = test_app()
        .oneshot(json_request(
            "POST",
            "/api/admin/register-vaccine",
            json!({ "sideEffects": "Mild fever" }),
            &[("admin_token", admin.as_str())],
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let empty = test_app()
        .oneshot(json_request(
            "POST",
            "/api/admin/register-vaccine",
            json!({ "name": "" }),
            &[("admin_token", admin.as_str())],
        ))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(empty).await["message"], "Vaccine name is required");
}

#[tokio::test]
async fn test_login_with_unknown_role_is_404() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/login/pharmacist",
            json!({ "id": "T1", "password": "secret123" }),
            &[],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_requires_password() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/login/hcp",
            json!({ "hcpId": "HCP0000000001", "password": "" }),
            &[],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let hospital = token(Role::Hospital, "H0000000001");
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/logout/hospital",
            json!({}),
            &[("hospital_token", hospital.as_str())],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("hospital_token="));
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await["message"], "Logged out successfully");
}
