use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loomap_auth_types::identity::Identity;
use loomap_domain::input::NumberInput;
use loomap_domain::pagination::Page;
use loomap_domain::rating::{Ratings, RatingsInput};

use crate::domain::types::Review;
use crate::error::ApiError;
use crate::handlers::{JsonBody, MessageResponse, PageQuery, QueryParams, parse_id};
use crate::state::AppState;
use crate::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase,
    ListReviewsUseCase, UpdateReviewInput, UpdateReviewUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub bathroom_id: Uuid,
    pub user_id: Uuid,
    /// `kind` plus the rating fields of that kind.
    #[serde(flatten)]
    pub ratings: Ratings,
    pub score: f64,
    pub best_for: Option<String>,
    pub comment: Option<String>,
    #[serde(serialize_with = "loomap_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "loomap_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            bathroom_id: r.bathroom_id,
            user_id: r.user_id,
            score: r.ratings.score(),
            ratings: r.ratings,
            best_for: r.best_for,
            comment: r.comment,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewResponse>,
    pub total: u64,
    pub page: u32,
    pub pages: u64,
}

impl From<Page<Review>> for ReviewListResponse {
    fn from(page: Page<Review>) -> Self {
        let pages = page.pages();
        let page = page.map(ReviewResponse::from);
        Self {
            reviews: page.items,
            total: page.total,
            page: page.page,
            pages,
        }
    }
}

#[derive(Serialize)]
pub struct CreateReviewResponse {
    pub message: &'static str,
    pub review_id: Uuid,
    pub review: ReviewResponse,
}

#[derive(Serialize)]
pub struct UpdateReviewResponse {
    pub message: &'static str,
    pub review: ReviewResponse,
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub rating: Option<NumberInput>,
    pub cleanliness: Option<NumberInput>,
    pub privacy: Option<NumberInput>,
    pub accessibility: Option<NumberInput>,
    pub best_for: Option<String>,
    pub comment: Option<String>,
}

impl ReviewRequest {
    fn split(self) -> (RatingsInput, Option<String>, Option<String>) {
        let ratings = RatingsInput {
            rating: self.rating,
            cleanliness: self.cleanliness,
            privacy: self.privacy,
            accessibility: self.accessibility,
        };
        (ratings, self.best_for, self.comment)
    }
}

// ── GET /api/bathrooms/{id}/reviews ──────────────────────────────────────────

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(bathroom_id): Path<String>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    let bathroom_id = parse_id(&bathroom_id, ApiError::BathroomNotFound)?;
    let usecase = ListReviewsUseCase {
        bathrooms: state.bathroom_repo(),
        reviews: state.review_repo(),
    };
    let page = usecase
        .execute(bathroom_id, query.page_request())
        .await?;
    Ok(Json(page.into()))
}

// ── POST /api/bathrooms/{id}/reviews ─────────────────────────────────────────

pub async fn create_review(
    identity: Identity,
    State(state): State<AppState>,
    Path(bathroom_id): Path<String>,
    JsonBody(body): JsonBody<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bathroom_id = parse_id(&bathroom_id, ApiError::BathroomNotFound)?;
    let usecase = CreateReviewUseCase {
        bathrooms: state.bathroom_repo(),
        reviews: state.review_repo(),
    };
    let (ratings, best_for, comment) = body.split();
    let review = usecase
        .execute(CreateReviewInput {
            bathroom_id,
            user_id: identity.user_id,
            ratings,
            best_for,
            comment,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            message: "Review added successfully",
            review_id: review.id,
            review: review.into(),
        }),
    ))
}

// ── GET /api/reviews/{id} ────────────────────────────────────────────────────

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review_id = parse_id(&review_id, ApiError::ReviewNotFound)?;
    let usecase = GetReviewUseCase {
        repo: state.review_repo(),
    };
    Ok(Json(usecase.execute(review_id).await?.into()))
}

// ── PUT /api/reviews/{id} ────────────────────────────────────────────────────

pub async fn update_review(
    identity: Identity,
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    JsonBody(body): JsonBody<ReviewRequest>,
) -> Result<Json<UpdateReviewResponse>, ApiError> {
    let review_id = parse_id(&review_id, ApiError::ReviewNotFound)?;
    let usecase = UpdateReviewUseCase {
        bathrooms: state.bathroom_repo(),
        reviews: state.review_repo(),
    };
    let (ratings, best_for, comment) = body.split();
    let review = usecase
        .execute(
            review_id,
            identity.user_id,
            UpdateReviewInput {
                ratings,
                best_for,
                comment,
            },
        )
        .await?;

    Ok(Json(UpdateReviewResponse {
        message: "Review updated successfully",
        review: review.into(),
    }))
}

// ── DELETE /api/reviews/{id} ─────────────────────────────────────────────────

pub async fn delete_review(
    identity: Identity,
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let review_id = parse_id(&review_id, ApiError::ReviewNotFound)?;
    let usecase = DeleteReviewUseCase {
        bathrooms: state.bathroom_repo(),
        reviews: state.review_repo(),
    };
    usecase.execute(review_id, identity.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Review deleted successfully",
    }))
}
