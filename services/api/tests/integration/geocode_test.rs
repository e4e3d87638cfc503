use loomap_api::domain::types::GeocodedAddress;
use loomap_api::error::ApiError;
use loomap_api::usecase::geocode::ConvertAddressUseCase;
use loomap_domain::geo::GeoPoint;

use crate::helpers::MockGeocoder;

fn bobst() -> GeocodedAddress {
    GeocodedAddress {
        location: GeoPoint::new(40.7295, -73.9972).unwrap(),
        display_name: "Elmer Holmes Bobst Library, 70, Washington Square South".into(),
    }
}

#[tokio::test]
async fn should_return_first_geocoder_hit() {
    let usecase = ConvertAddressUseCase {
        geocoder: MockGeocoder::Found(bobst()),
    };

    let found = usecase
        .execute(Some("70 Washington Square S".into()))
        .await
        .unwrap();

    assert_eq!(found, bobst());
}

#[tokio::test]
async fn should_require_address() {
    let usecase = ConvertAddressUseCase {
        geocoder: MockGeocoder::Found(bobst()),
    };

    assert!(matches!(
        usecase.execute(None).await,
        Err(ApiError::MissingData)
    ));
    assert!(matches!(
        usecase.execute(Some("  ".into())).await,
        Err(ApiError::MissingData)
    ));
}

#[tokio::test]
async fn should_report_unmatched_address() {
    let usecase = ConvertAddressUseCase {
        geocoder: MockGeocoder::NoMatch,
    };

    let result = usecase.execute(Some("nowhere in particular".into())).await;

    assert!(matches!(result, Err(ApiError::AddressNotFound)));
}

#[tokio::test]
async fn should_surface_geocoder_outage() {
    let usecase = ConvertAddressUseCase {
        geocoder: MockGeocoder::Down,
    };

    let result = usecase.execute(Some("70 Washington Square S".into())).await;

    assert!(matches!(result, Err(ApiError::GeocoderUnavailable(_))));
}
