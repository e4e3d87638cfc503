use crate::domain::repository::GeocoderPort;
use crate::domain::types::GeocodedAddress;
use crate::error::ApiError;

// ── ConvertAddress ───────────────────────────────────────────────────────────

pub struct ConvertAddressUseCase<G: GeocoderPort> {
    pub geocoder: G,
}

impl<G: GeocoderPort> ConvertAddressUseCase<G> {
    pub async fn execute(&self, address: Option<String>) -> Result<GeocodedAddress, ApiError> {
        let address = address
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty())
            .ok_or(ApiError::MissingData)?;
        self.geocoder
            .geocode(&address)
            .await?
            .ok_or(ApiError::AddressNotFound)
    }
}
