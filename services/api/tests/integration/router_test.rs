//! Router tests for paths that never reach storage.

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use reqwest::Url;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use loomap_api::infra::geocoder::NominatimGeocoder;
use loomap_api::router::build_router;
use loomap_api::state::AppState;
use loomap_testing::auth::MockAuth;

use crate::helpers::TEST_JWT_SECRET;

fn server() -> TestServer {
    let geocoder = NominatimGeocoder::new(
        Url::parse("http://127.0.0.1:9/search").unwrap(),
        "loomap-test".into(),
        Duration::from_secs(1),
    )
    .unwrap();
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        cookie_secure: false,
        geocoder,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn assert_kind(body: &Value, kind: &str) {
    assert_eq!(body["kind"], kind, "unexpected body {body}");
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_health() {
    let server = server();

    assert_eq!(server.get("/healthz").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/readyz").await.status_code(), StatusCode::OK);

    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "healthy" }));
}

#[tokio::test]
async fn should_attach_request_id() {
    let response = server().get("/healthz").await;

    let id = response.headers().get("x-request-id").unwrap();
    assert!(id.to_str().unwrap().parse::<Uuid>().is_ok());
}

// ── Authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_writes_without_token() {
    let server = server();

    let response = server
        .post("/api/bathrooms")
        .json(&json!({ "building": "Bobst Library" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server.delete(&format!("/api/reviews/{}", Uuid::now_v7())).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    assert_eq!(
        server.get("/api/users/me").await.status_code(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let (token, _) =
        loomap_auth_types::token::issue_access_token(Uuid::now_v7(), "other-secret").unwrap();

    let response = server()
        .get("/api/users/me")
        .authorization_bearer(token)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_require_registration_fields() {
    let response = server()
        .post("/api/auth/register")
        .json(&json!({ "email": "sam@nyu.edu" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "MISSING_DATA");
}

#[tokio::test]
async fn should_treat_unreadable_body_as_missing_data() {
    let response = server().post("/api/auth/login").text("email=sam").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "MISSING_DATA");
}

#[tokio::test]
async fn should_clear_cookie_on_logout() {
    let response = server().post("/api/auth/logout").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let cookie = response.headers().get("set-cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("access_token_cookie=;"), "got {cookie}");
    assert!(cookie.contains("Max-Age=0"), "got {cookie}");
}

// ── Bathrooms ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_malformed_ids() {
    let server = server();

    let response = server.get("/api/bathrooms/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_kind(&response.json(), "BATHROOM_NOT_FOUND");

    let response = server.get("/api/reviews/42").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_kind(&response.json(), "REVIEW_NOT_FOUND");
}

#[tokio::test]
async fn should_require_nearby_coordinates() {
    let response = server().get("/api/bathrooms/nearby?lat=40.73").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "MISSING_DATA");
}

#[tokio::test]
async fn should_treat_blank_nearby_coordinates_as_missing() {
    let response = server().get("/api/bathrooms/nearby?lat=&lng=").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_unparsable_nearby_coordinates() {
    let response = server()
        .get("/api/bathrooms/nearby?lat=north&lng=-73.99")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "VALIDATION_FAILED");
}

#[tokio::test]
async fn should_reject_unknown_gender_filter() {
    let response = server().get("/api/bathrooms?gender=unisex").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "VALIDATION_FAILED");
}

#[tokio::test]
async fn should_reject_bathroom_missing_coordinates() {
    let auth = MockAuth::random();
    let (name, value) = auth.bearer();

    let response = server()
        .post("/api/bathrooms")
        .add_header(name, value)
        .json(&json!({ "building": "Bobst Library", "floor": 1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "MISSING_DATA");
}

#[tokio::test]
async fn should_reject_negative_floor() {
    let auth = MockAuth::random();
    let (name, value) = auth.cookie();

    let response = server()
        .post("/api/bathrooms")
        .add_header(name, value)
        .json(&json!({
            "building": "Bobst Library",
            "floor": -1,
            "latitude": 40.7295,
            "longitude": -73.9975
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_kind(&body, "VALIDATION_FAILED");
    assert_eq!(body["message"], "floor must be non-negative");
}

// ── Reviews ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_empty_review_update() {
    let auth = MockAuth::random();
    let (name, value) = auth.bearer();

    let response = server()
        .put(&format!("/api/reviews/{}", Uuid::now_v7()))
        .add_header(name, value)
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "MISSING_DATA");
}

// ── Geocoding ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_address_to_convert() {
    let response = server()
        .post("/api/convert-address")
        .json(&json!({ "address": "  " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_kind(&response.json(), "MISSING_DATA");
}
