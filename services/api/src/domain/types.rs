use chrono::{DateTime, Utc};
use uuid::Uuid;

use loomap_domain::geo::GeoPoint;
use loomap_domain::location::Gender;
use loomap_domain::rating::Ratings;

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bathroom location with its derived rating.
#[derive(Debug, Clone)]
pub struct Bathroom {
    pub id: Uuid,
    pub building: String,
    pub floor: i32,
    pub location: GeoPoint,
    pub is_accessible: bool,
    pub gender: Gender,
    /// `None` for seeded rows.
    pub created_by: Option<Uuid>,
    pub rating: f64,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's review of a bathroom.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: Uuid,
    pub bathroom_id: Uuid,
    pub user_id: Uuid,
    pub ratings: Ratings,
    pub best_for: Option<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing filters; `None` means unfiltered.
#[derive(Debug, Clone, Default)]
pub struct BathroomFilter {
    /// Case-insensitive substring of the building name.
    pub building: Option<String>,
    pub gender: Option<Gender>,
    pub is_accessible: Option<bool>,
}

/// Validated partial update of a bathroom's descriptive fields.
#[derive(Debug, Clone, Default)]
pub struct BathroomPatch {
    pub building: Option<String>,
    pub floor: Option<i32>,
    pub location: Option<GeoPoint>,
    pub is_accessible: Option<bool>,
    pub gender: Option<Gender>,
}

impl BathroomPatch {
    pub fn is_empty(&self) -> bool {
        self.building.is_none()
            && self.floor.is_none()
            && self.location.is_none()
            && self.is_accessible.is_none()
            && self.gender.is_none()
    }

    pub fn apply(&self, bathroom: &mut Bathroom) {
        if let Some(ref building) = self.building {
            bathroom.building = building.clone();
        }
        if let Some(floor) = self.floor {
            bathroom.floor = floor;
        }
        if let Some(location) = self.location {
            bathroom.location = location;
        }
        if let Some(is_accessible) = self.is_accessible {
            bathroom.is_accessible = is_accessible;
        }
        if let Some(gender) = self.gender {
            bathroom.gender = gender;
        }
    }
}

/// A bathroom and its distance from a query point.
#[derive(Debug, Clone)]
pub struct NearbyBathroom {
    pub bathroom: Bathroom,
    pub distance_m: f64,
}

/// First geocoder match for an address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub location: GeoPoint,
    pub display_name: String,
}

/// Trim free text; blank becomes `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
