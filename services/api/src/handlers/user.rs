use axum::{Json, extract::State};
use serde::Serialize;
use uuid::Uuid;

use loomap_auth_types::identity::Identity;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::handlers::review::ReviewListResponse;
use crate::handlers::{PageQuery, QueryParams};
use crate::state::AppState;
use crate::usecase::review::ListUserReviewsUseCase;
use crate::usecase::user::GetUserUseCase;

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(serialize_with = "loomap_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

// ── GET /api/users/me ────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── GET /api/users/me/reviews ────────────────────────────────────────────────

pub async fn get_my_reviews(
    identity: Identity,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    let usecase = ListUserReviewsUseCase {
        repo: state.review_repo(),
    };
    let page = usecase
        .execute(identity.user_id, query.page_request())
        .await?;
    Ok(Json(page.into()))
}
