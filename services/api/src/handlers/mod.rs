pub mod auth;
pub mod bathroom;
pub mod geocode;
pub mod review;
pub mod user;

use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loomap_domain::pagination::PageRequest;

use crate::error::ApiError;

/// `Json` whose rejection is reported as `MISSING_DATA`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `Query` whose rejection is reported as `MISSING_DATA`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// Parse a path id; a malformed id cannot name an existing record.
pub fn parse_id(raw: &str, not_found: ApiError) -> Result<Uuid, ApiError> {
    raw.parse().map_err(|_| not_found)
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ── Pagination ───────────────────────────────────────────────────────────────

/// `?page=&per_page=`; unparsable values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(lenient_u32(&self.page), lenient_u32(&self.per_page))
    }
}

fn lenient_u32(raw: &Option<String>) -> Option<u32> {
    let value: i64 = raw.as_deref()?.trim().parse().ok()?;
    Some(value.clamp(0, i64::from(u32::MAX)) as u32)
}
