//! Geographic points and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::input::NumberInput;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Validate a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange);
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Interpret loosely-typed coordinates.
    pub fn parse(latitude: &NumberInput, longitude: &NumberInput) -> Result<Self, ValidationError> {
        let lat = latitude
            .as_float()
            .ok_or(ValidationError::NotANumber("latitude"))?;
        let lng = longitude
            .as_float()
            .ok_or(ValidationError::NotANumber("longitude"))?;
        Self::new(lat, lng)
    }

    /// Haversine distance in meters.
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let dlat = lat2 - lat1;
        let dlng = (other.longitude - self.longitude).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
    }

    pub fn to_geojson(&self) -> GeoJsonPoint {
        GeoJsonPoint {
            kind: GeoJsonKind::Point,
            coordinates: [self.longitude, self.latitude],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoJsonKind {
    Point,
}

/// GeoJSON `Point`; coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: GeoJsonKind,
    pub coordinates: [f64; 2],
}

/// Axis-aligned box enclosing every point within a radius of a center.
///
/// Used as a cheap index prefilter before exact distance checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn around(center: &GeoPoint, radius_m: f64) -> Self {
        let angular = radius_m / EARTH_RADIUS_M;
        let dlat = angular.to_degrees();
        let min_latitude = (center.latitude - dlat).max(-90.0);
        let max_latitude = (center.latitude + dlat).min(90.0);

        // widest longitude span of a spherical cap: asin(sin(r/R) / cos(lat))
        let ratio = angular.sin() / center.latitude.to_radians().cos();
        let (min_longitude, max_longitude) = if max_latitude >= 90.0
            || min_latitude <= -90.0
            || !(0.0..1.0).contains(&ratio)
        {
            (-180.0, 180.0)
        } else {
            let dlng = ratio.asin().to_degrees();
            (center.longitude - dlng, center.longitude + dlng)
        };

        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        let lng = point.longitude;
        let in_longitude = (self.min_longitude..=self.max_longitude).contains(&lng)
            || (self.min_longitude..=self.max_longitude).contains(&(lng + 360.0))
            || (self.min_longitude..=self.max_longitude).contains(&(lng - 360.0));
        (self.min_latitude..=self.max_latitude).contains(&point.latitude) && in_longitude
    }

    /// Whether the box crosses the antimeridian.
    pub fn wraps(&self) -> bool {
        self.min_longitude < -180.0 || self.max_longitude > 180.0
    }
}
