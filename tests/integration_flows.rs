//! End-to-end flows against Postgres. Run with
//! `DATABASE_URL=... cargo test -- --ignored`.

mod common;

use axum::Router;
use axum::http::{StatusCode, header};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use common::{body_json, db_app, get_with_cookies, json_request, token};
use evrs::evrs_auth::Role;
use evrs::evrs_core::hash_password;

const ADMIN_ID: &str = "A0000000001";
const ADMIN_PASSWORD: &str = "admin-pass-123";

async fn insert_admin(pool: &PgPool) {
    sqlx::query(
        "INSERT INTO admins (admin_id, full_name, email, password_hash) VALUES ($1, $2, $3, $4)",
    )
    .bind(ADMIN_ID)
    .bind("Root Admin")
    .bind("root@evrs.test")
    .bind(hash_password(ADMIN_PASSWORD).unwrap())
    .execute(pool)
    .await
    .unwrap();
}

async fn send(app: &Router, request: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

fn patient_body(serial: &str) -> Value {
    json!({
        "serialNumber": serial,
        "firstName": "Nimal",
        "lastName": "Perera",
        "birthDate": "2020-03-14",
        "district": "Colombo",
        "division": "Borella",
        "guardianNIC": "198012345678"
    })
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_login_sets_role_cookie(pool: PgPool) {
    insert_admin(&pool).await;
    let app = db_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login/admin",
            json!({ "adminId": ADMIN_ID, "password": ADMIN_PASSWORD }),
            &[],
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
    assert!(set_cookie.starts_with("admin_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let body = body_json(response).await;
    assert_eq!(body["account"]["adminId"], ADMIN_ID);
    assert!(body["account"].get("passwordHash").is_none());
    assert!(body["token"].as_str().is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_login_failures_are_401(pool: PgPool) {
    insert_admin(&pool).await;
    let app = db_app(pool);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login/admin",
            json!({ "id": ADMIN_ID, "password": "wrong-password" }),
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login/admin",
            json!({ "id": "A9999999999", "password": ADMIN_PASSWORD }),
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Right id and password, wrong role table.
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login/moh",
            json!({ "id": ADMIN_ID, "password": ADMIN_PASSWORD }),
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_vaccination_flow(pool: PgPool) {
    insert_admin(&pool).await;
    let app = db_app(pool);
    let admin = token(Role::Admin, ADMIN_ID);
    let admin_cookie = [("admin_token", admin.as_str())];

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/register-hospital",
            json!({ "name": "Colombo General", "email": "cgh@evrs.test",
                    "province": "Western", "district": "Colombo" }),
            &admin_cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hospital_id = body["account"]["id"].as_str().unwrap().to_string();
    let hospital_password = body["account"]["password"].as_str().unwrap().to_string();
    assert!(hospital_id.starts_with('H'));
    assert_eq!(hospital_password.len(), 10);

    // The one-time password signs the hospital in.
    let (status, login) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login/hospital",
            json!({ "hospitalId": hospital_id, "password": hospital_password }),
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hospital = login["token"].as_str().unwrap().to_string();
    let hospital_cookie = [("hospital_token", hospital.as_str())];

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/hospital/register-patient",
            patient_body("SN-001"),
            &hospital_cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let citizen_id = body["account"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/hospital/register-patient",
            patient_body("SN-001"),
            &hospital_cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/register-vaccine",
            json!({ "name": "BCG", "sideEffects": "Mild swelling" }),
            &admin_cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let vaccine_id = body["vaccine"]["vaccineId"].as_str().unwrap().to_string();

    let uri = format!("/api/hospital/vaccinations/{citizen_id}");
    let (status, body) = send(&app, get_with_cookies(&uri, &hospital_cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["patient"]["citizenId"], citizen_id.as_str());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/hospital/add-vaccination",
            json!({
                "citizenId": citizen_id,
                "vaccineId": vaccine_id,
                "batchNumber": "B-7",
                "expiryDate": "2027-06-30",
                "vaccinationLocation": "Colombo General",
                "division": "Borella",
                "recordedBy": { "id": "A0000000009", "role": "admin" }
            }),
            &hospital_cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["record"]["recordedBy"]["id"], hospital_id.as_str());
    assert_eq!(body["record"]["recordedBy"]["role"], "hospital");
    assert_eq!(body["record"]["additionalNotes"], "");

    let (status, body) = send(&app, get_with_cookies(&uri, &hospital_cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"][0]["vaccineName"], "BCG");

    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/admin/vaccine/{vaccine_id}"),
            json!({}),
            &admin_cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get_with_cookies(&uri, &hospital_cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"][0]["vaccineName"], "Unknown");

    // The citizen sees their own records and nobody else's.
    let citizen = token(Role::Citizen, &citizen_id);
    let (status, _) = send(
        &app,
        get_with_cookies(
            &format!("/api/citizen/vaccinations/{citizen_id}"),
            &[("citizen_token", citizen.as_str())],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_password_change_rules(pool: PgPool) {
    insert_admin(&pool).await;
    let app = db_app(pool);
    let admin = token(Role::Admin, ADMIN_ID);
    let cookie = [("admin_token", admin.as_str())];

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/profile/password",
            json!({ "currentPassword": "not-it", "newPassword": "brand-new-pass" }),
            &cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/profile/password",
            json!({ "currentPassword": ADMIN_PASSWORD, "newPassword": ADMIN_PASSWORD }),
            &cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/profile/password",
            json!({ "currentPassword": ADMIN_PASSWORD, "newPassword": "brand-new-pass" }),
            &cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login/admin",
            json!({ "id": ADMIN_ID, "password": "brand-new-pass" }),
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_citizen_updates_own_medical_info(pool: PgPool) {
    insert_admin(&pool).await;
    let app = db_app(pool);
    let admin = token(Role::Admin, ADMIN_ID);

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/register-patient",
            patient_body("SN-042"),
            &[("admin_token", admin.as_str())],
        ),
    )
    .await;
    let citizen_id = body["account"]["id"].as_str().unwrap().to_string();
    let citizen = token(Role::Citizen, &citizen_id);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/citizen/profile/medical",
            json!({ "bloodType": "O+", "allergies": "penicillin, peanuts" }),
            &[("citizen_token", citizen.as_str())],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["medical"]["bloodType"], "O+");
    assert_eq!(body["medical"]["allergies"], json!(["penicillin", "peanuts"]));
}
