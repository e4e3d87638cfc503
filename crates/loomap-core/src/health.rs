use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Liveness probe, `GET /healthz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe, `GET /readyz`.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

/// Handler for the JSON health probe used by front-end clients.
pub async fn health_json() -> Json<HealthBody> {
    Json(HealthBody { status: "healthy" })
}
