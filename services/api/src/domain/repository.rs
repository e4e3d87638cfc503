#![allow(async_fn_in_trait)]

use uuid::Uuid;

use loomap_domain::geo::BoundingBox;
use loomap_domain::pagination::{Page, PageRequest};
use loomap_domain::rating::{Ratings, RatingSummary};

use crate::domain::types::{
    Bathroom, BathroomFilter, BathroomPatch, GeocodedAddress, Review, User,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    /// Fails with `UserAlreadyExists` if the email is taken.
    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

/// Repository for bathroom locations.
pub trait BathroomRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bathroom>, ApiError>;

    /// Newest first.
    async fn list(
        &self,
        filter: &BathroomFilter,
        page: PageRequest,
    ) -> Result<Page<Bathroom>, ApiError>;

    /// Every bathroom whose point lies inside `bbox`, unordered.
    async fn list_within(&self, bbox: &BoundingBox) -> Result<Vec<Bathroom>, ApiError>;

    async fn count(&self) -> Result<u64, ApiError>;

    async fn create(&self, bathroom: &Bathroom) -> Result<(), ApiError>;

    /// Returns `false` if no row matched.
    async fn update(&self, id: Uuid, patch: &BathroomPatch) -> Result<bool, ApiError>;

    /// Persist a recomputed aggregate rating.
    async fn set_rating(&self, id: Uuid, summary: RatingSummary) -> Result<(), ApiError>;

    /// Returns `false` if no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for reviews.
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, ApiError>;

    /// Newest first.
    async fn list_by_bathroom(
        &self,
        bathroom_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Review>, ApiError>;

    /// Newest first.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Review>, ApiError>;

    /// Ratings of every live review of a bathroom.
    async fn ratings_for_bathroom(&self, bathroom_id: Uuid) -> Result<Vec<Ratings>, ApiError>;

    async fn create(&self, review: &Review) -> Result<(), ApiError>;

    /// Overwrite ratings, text fields and `updated_at`.
    async fn update(&self, review: &Review) -> Result<(), ApiError>;

    /// Returns `false` if no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Returns the number of deleted rows.
    async fn delete_by_bathroom(&self, bathroom_id: Uuid) -> Result<u64, ApiError>;
}

/// Port to an external address geocoder.
pub trait GeocoderPort: Send + Sync {
    /// `Ok(None)` when the address has no match.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, ApiError>;
}
