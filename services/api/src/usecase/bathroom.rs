use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use loomap_domain::ValidationError;
use loomap_domain::geo::{BoundingBox, GeoPoint};
use loomap_domain::input::NumberInput;
use loomap_domain::location::{Gender, parse_floor, validate_floor, validate_location_fields};
use loomap_domain::pagination::{Page, PageRequest};
use loomap_domain::rating::RatingSummary;

use crate::domain::repository::{BathroomRepository, ReviewRepository};
use crate::domain::types::{Bathroom, BathroomFilter, BathroomPatch, NearbyBathroom};
use crate::error::ApiError;

/// Search radius when the caller gives none, in meters.
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 500.0;

/// Most bathrooms returned by a nearby search.
pub const NEARBY_LIMIT: usize = 10;

// ── ListBathrooms ────────────────────────────────────────────────────────────

pub struct ListBathroomsUseCase<R: BathroomRepository> {
    pub repo: R,
}

impl<R: BathroomRepository> ListBathroomsUseCase<R> {
    pub async fn execute(
        &self,
        filter: BathroomFilter,
        page: PageRequest,
    ) -> Result<Page<Bathroom>, ApiError> {
        let filter = BathroomFilter {
            building: filter
                .building
                .map(|b| b.trim().to_owned())
                .filter(|b| !b.is_empty()),
            ..filter
        };
        self.repo.list(&filter, page.clamped()).await
    }
}

// ── GetBathroom ──────────────────────────────────────────────────────────────

pub struct GetBathroomUseCase<R: BathroomRepository> {
    pub repo: R,
}

impl<R: BathroomRepository> GetBathroomUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Bathroom, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::BathroomNotFound)
    }
}

// ── CreateBathroom ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct CreateBathroomInput {
    pub building: Option<String>,
    pub floor: Option<NumberInput>,
    pub latitude: Option<NumberInput>,
    pub longitude: Option<NumberInput>,
    pub is_accessible: Option<bool>,
    pub gender: Option<String>,
    pub created_by: Option<Uuid>,
}

impl CreateBathroomInput {
    /// Validate the raw fields into a new bathroom with an empty rating.
    pub fn into_bathroom(self) -> Result<Bathroom, ApiError> {
        let (Some(building), Some(floor), Some(latitude), Some(longitude)) =
            (self.building, self.floor, self.latitude, self.longitude)
        else {
            return Err(ApiError::MissingData);
        };

        let floor = parse_floor(&floor)?;
        let gender = validate_location_fields(
            &building,
            floor,
            self.gender.as_deref().unwrap_or(Gender::default().as_str()),
        )?;
        let floor = validate_floor(floor)?;
        let location = GeoPoint::parse(&latitude, &longitude)?;

        let now = Utc::now();
        Ok(Bathroom {
            id: Uuid::now_v7(),
            building: building.trim().to_owned(),
            floor,
            location,
            is_accessible: self.is_accessible.unwrap_or(false),
            gender,
            created_by: self.created_by,
            rating: RatingSummary::EMPTY.average,
            review_count: RatingSummary::EMPTY.count,
            created_at: now,
            updated_at: now,
        })
    }
}

pub struct CreateBathroomUseCase<R: BathroomRepository> {
    pub repo: R,
}

impl<R: BathroomRepository> CreateBathroomUseCase<R> {
    pub async fn execute(&self, input: CreateBathroomInput) -> Result<Bathroom, ApiError> {
        let bathroom = input.into_bathroom()?;
        self.repo.create(&bathroom).await?;
        info!(bathroom_id = %bathroom.id, building = %bathroom.building, "bathroom created");
        Ok(bathroom)
    }
}

// ── UpdateBathroom ───────────────────────────────────────────────────────────

/// Raw partial update. The point changes only when both coordinates are given.
#[derive(Default)]
pub struct UpdateBathroomInput {
    pub building: Option<String>,
    pub floor: Option<NumberInput>,
    pub latitude: Option<NumberInput>,
    pub longitude: Option<NumberInput>,
    pub is_accessible: Option<bool>,
    pub gender: Option<String>,
}

impl UpdateBathroomInput {
    fn validate(self) -> Result<BathroomPatch, ValidationError> {
        let building = match self.building {
            Some(b) if b.trim().is_empty() => return Err(ValidationError::MissingField("building")),
            Some(b) => Some(b.trim().to_owned()),
            None => None,
        };
        let floor = self
            .floor
            .as_ref()
            .map(|f| parse_floor(f).and_then(validate_floor))
            .transpose()?;
        let gender = self
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()?;
        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::parse(&lat, &lng)?),
            _ => None,
        };
        Ok(BathroomPatch {
            building,
            floor,
            location,
            is_accessible: self.is_accessible,
            gender,
        })
    }
}

pub struct UpdateBathroomUseCase<R: BathroomRepository> {
    pub repo: R,
}

impl<R: BathroomRepository> UpdateBathroomUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateBathroomInput) -> Result<Bathroom, ApiError> {
        let patch = input.validate()?;
        if patch.is_empty() {
            return Err(ApiError::MissingData);
        }

        let mut bathroom = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::BathroomNotFound)?;

        if !self.repo.update(id, &patch).await? {
            return Err(ApiError::BathroomNotFound);
        }
        patch.apply(&mut bathroom);
        bathroom.updated_at = Utc::now();
        info!(bathroom_id = %id, "bathroom updated");
        Ok(bathroom)
    }
}

// ── DeleteBathroom ───────────────────────────────────────────────────────────

pub struct DeleteBathroomUseCase<B: BathroomRepository, R: ReviewRepository> {
    pub bathrooms: B,
    pub reviews: R,
}

impl<B: BathroomRepository, R: ReviewRepository> DeleteBathroomUseCase<B, R> {
    /// Delete a bathroom together with all of its reviews.
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        self.bathrooms
            .find_by_id(id)
            .await?
            .ok_or(ApiError::BathroomNotFound)?;

        let removed_reviews = self.reviews.delete_by_bathroom(id).await?;
        if !self.bathrooms.delete(id).await? {
            return Err(ApiError::BathroomNotFound);
        }
        info!(bathroom_id = %id, removed_reviews, "bathroom deleted");
        Ok(())
    }
}

// ── NearbyBathrooms ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct NearbyInput {
    pub latitude: Option<NumberInput>,
    pub longitude: Option<NumberInput>,
    pub max_distance: Option<NumberInput>,
}

pub struct NearbyBathroomsUseCase<R: BathroomRepository> {
    pub repo: R,
}

impl<R: BathroomRepository> NearbyBathroomsUseCase<R> {
    /// Bathrooms within `max_distance` meters of a point, nearest first, at most
    /// [`NEARBY_LIMIT`].
    pub async fn execute(&self, input: NearbyInput) -> Result<Vec<NearbyBathroom>, ApiError> {
        let (Some(latitude), Some(longitude)) = (input.latitude, input.longitude) else {
            return Err(ApiError::MissingData);
        };
        let center = GeoPoint::parse(&latitude, &longitude)?;
        let radius = match input.max_distance {
            Some(raw) => raw
                .as_float()
                .filter(|d| *d > 0.0)
                .ok_or(ValidationError::InvalidDistance)?,
            None => DEFAULT_NEARBY_RADIUS_M,
        };

        let candidates = self
            .repo
            .list_within(&BoundingBox::around(&center, radius))
            .await?;

        let mut nearby: Vec<NearbyBathroom> = candidates
            .into_iter()
            .map(|bathroom| NearbyBathroom {
                distance_m: center.distance_m(&bathroom.location),
                bathroom,
            })
            .filter(|n| n.distance_m <= radius)
            .collect();
        nearby.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        nearby.truncate(NEARBY_LIMIT);
        Ok(nearby)
    }
}
