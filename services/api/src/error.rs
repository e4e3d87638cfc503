use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::{DbErr, SqlErr};

use loomap_domain::ValidationError;

/// API error variants. Each maps to an HTTP status and a machine-readable `kind`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("missing data")]
    MissingData,
    #[error("bathroom not found")]
    BathroomNotFound,
    #[error("review not found")]
    ReviewNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("could not find coordinates for this address")]
    AddressNotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("geocoding service unavailable")]
    GeocoderUnavailable(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::MissingData => "MISSING_DATA",
            Self::BathroomNotFound => "BATHROOM_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AddressNotFound => "ADDRESS_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::GeocoderUnavailable(_) => "GEOCODER_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::BathroomNotFound
            | Self::ReviewNotFound
            | Self::UserNotFound
            | Self::AddressNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::GeocoderUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a unique-constraint violation to `conflict`, anything else to `Internal`.
    pub fn from_db(err: DbErr, conflict: ApiError, context: &'static str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
            _ => Self::Internal(anyhow::Error::new(err).context(context)),
        }
    }
}

// Unreadable bodies and query strings are reported like absent ones.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::MissingData
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected query string");
        Self::MissingData
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors; TraceLayer already records them.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
            }
            Self::GeocoderUnavailable(e) => {
                tracing::warn!(error = ?e, kind = "GEOCODER_UNAVAILABLE", "geocoder failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
