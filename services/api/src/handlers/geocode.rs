use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::geocode::ConvertAddressUseCase;

#[derive(Deserialize)]
pub struct ConvertAddressRequest {
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct ConvertAddressResponse {
    pub lat: f64,
    pub long: f64,
    pub display_name: String,
}

// ── POST /api/convert-address ────────────────────────────────────────────────

pub async fn convert_address(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ConvertAddressRequest>,
) -> Result<Json<ConvertAddressResponse>, ApiError> {
    let usecase = ConvertAddressUseCase {
        geocoder: state.geocoder.clone(),
    };
    let found = usecase.execute(body.address).await?;
    Ok(Json(ConvertAddressResponse {
        lat: found.location.latitude,
        long: found.location.longitude,
        display_name: found.display_name,
    }))
}
