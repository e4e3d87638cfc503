use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use loomap_domain::pagination::{Page, PageRequest};
use loomap_domain::rating::{
    RatingSummary, RatingsInput, aggregate, validate_rating_patch, validate_review_fields,
};

use crate::domain::repository::{BathroomRepository, ReviewRepository};
use crate::domain::types::{Review, normalize_text};
use crate::error::ApiError;

/// Recompute a bathroom's aggregate rating from all of its live reviews and persist it.
pub async fn refresh_bathroom_rating<B, R>(
    bathrooms: &B,
    reviews: &R,
    bathroom_id: Uuid,
) -> Result<RatingSummary, ApiError>
where
    B: BathroomRepository,
    R: ReviewRepository,
{
    let ratings = reviews.ratings_for_bathroom(bathroom_id).await?;
    let summary = aggregate(&ratings);
    bathrooms.set_rating(bathroom_id, summary).await?;
    debug!(
        %bathroom_id,
        rating = summary.average,
        review_count = summary.count,
        "aggregate rating recomputed"
    );
    Ok(summary)
}

// ── ListReviews ──────────────────────────────────────────────────────────────

pub struct ListReviewsUseCase<B: BathroomRepository, R: ReviewRepository> {
    pub bathrooms: B,
    pub reviews: R,
}

impl<B: BathroomRepository, R: ReviewRepository> ListReviewsUseCase<B, R> {
    pub async fn execute(
        &self,
        bathroom_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Review>, ApiError> {
        self.bathrooms
            .find_by_id(bathroom_id)
            .await?
            .ok_or(ApiError::BathroomNotFound)?;
        self.reviews.list_by_bathroom(bathroom_id, page).await
    }
}

// ── GetReview ────────────────────────────────────────────────────────────────

pub struct GetReviewUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> GetReviewUseCase<R> {
    pub async fn execute(&self, review_id: Uuid) -> Result<Review, ApiError> {
        self.repo
            .find_by_id(review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)
    }
}

// ── CreateReview ─────────────────────────────────────────────────────────────

pub struct CreateReviewInput {
    pub bathroom_id: Uuid,
    pub user_id: Uuid,
    pub ratings: RatingsInput,
    pub best_for: Option<String>,
    pub comment: Option<String>,
}

pub struct CreateReviewUseCase<B: BathroomRepository, R: ReviewRepository> {
    pub bathrooms: B,
    pub reviews: R,
}

impl<B: BathroomRepository, R: ReviewRepository> CreateReviewUseCase<B, R> {
    pub async fn execute(&self, input: CreateReviewInput) -> Result<Review, ApiError> {
        self.bathrooms
            .find_by_id(input.bathroom_id)
            .await?
            .ok_or(ApiError::BathroomNotFound)?;

        let ratings = validate_review_fields(&input.ratings)?;

        let now = Utc::now();
        let review = Review {
            id: Uuid::now_v7(),
            bathroom_id: input.bathroom_id,
            user_id: input.user_id,
            ratings,
            best_for: normalize_text(input.best_for),
            comment: normalize_text(input.comment),
            created_at: now,
            updated_at: now,
        };
        self.reviews.create(&review).await?;
        info!(review_id = %review.id, bathroom_id = %review.bathroom_id, "review created");

        refresh_bathroom_rating(&self.bathrooms, &self.reviews, review.bathroom_id).await?;
        Ok(review)
    }
}

// ── UpdateReview ─────────────────────────────────────────────────────────────

/// Fields to change; absent fields are left untouched, blank text clears.
#[derive(Default)]
pub struct UpdateReviewInput {
    pub ratings: RatingsInput,
    pub best_for: Option<String>,
    pub comment: Option<String>,
}

impl UpdateReviewInput {
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty() && self.best_for.is_none() && self.comment.is_none()
    }
}

pub struct UpdateReviewUseCase<B: BathroomRepository, R: ReviewRepository> {
    pub bathrooms: B,
    pub reviews: R,
}

impl<B: BathroomRepository, R: ReviewRepository> UpdateReviewUseCase<B, R> {
    pub async fn execute(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        input: UpdateReviewInput,
    ) -> Result<Review, ApiError> {
        if input.is_empty() {
            return Err(ApiError::MissingData);
        }

        let mut review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)?;
        if review.user_id != user_id {
            return Err(ApiError::Forbidden);
        }

        let patch = validate_rating_patch(&input.ratings)?;
        review.ratings = review.ratings.patched(&patch)?;
        if input.best_for.is_some() {
            review.best_for = normalize_text(input.best_for);
        }
        if input.comment.is_some() {
            review.comment = normalize_text(input.comment);
        }
        review.updated_at = Utc::now();

        self.reviews.update(&review).await?;
        info!(%review_id, "review updated");

        refresh_bathroom_rating(&self.bathrooms, &self.reviews, review.bathroom_id).await?;
        Ok(review)
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<B: BathroomRepository, R: ReviewRepository> {
    pub bathrooms: B,
    pub reviews: R,
}

impl<B: BathroomRepository, R: ReviewRepository> DeleteReviewUseCase<B, R> {
    pub async fn execute(&self, review_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)?;
        if review.user_id != user_id {
            return Err(ApiError::Forbidden);
        }

        if !self.reviews.delete(review_id).await? {
            return Err(ApiError::ReviewNotFound);
        }
        info!(%review_id, "review deleted");

        refresh_bathroom_rating(&self.bathrooms, &self.reviews, review.bathroom_id).await?;
        Ok(())
    }
}

// ── ListUserReviews ──────────────────────────────────────────────────────────

pub struct ListUserReviewsUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> ListUserReviewsUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Review>, ApiError> {
        self.repo.list_by_user(user_id, page).await
    }
}
