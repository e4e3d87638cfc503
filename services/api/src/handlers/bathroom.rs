use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loomap_auth_types::identity::Identity;
use loomap_domain::geo::GeoJsonPoint;
use loomap_domain::input::NumberInput;
use loomap_domain::location::Gender;
use loomap_domain::pagination::Page;

use crate::domain::types::{Bathroom, BathroomFilter, NearbyBathroom};
use crate::error::ApiError;
use crate::handlers::{JsonBody, MessageResponse, PageQuery, QueryParams, parse_id};
use crate::state::AppState;
use crate::usecase::bathroom::{
    CreateBathroomInput, CreateBathroomUseCase, DeleteBathroomUseCase, GetBathroomUseCase,
    ListBathroomsUseCase, NearbyBathroomsUseCase, NearbyInput, UpdateBathroomInput,
    UpdateBathroomUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BathroomResponse {
    pub id: Uuid,
    pub building: String,
    pub floor: i32,
    pub location: GeoJsonPoint,
    pub is_accessible: bool,
    pub gender: Gender,
    pub rating: f64,
    pub review_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    #[serde(serialize_with = "loomap_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "loomap_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Bathroom> for BathroomResponse {
    fn from(b: Bathroom) -> Self {
        Self {
            id: b.id,
            building: b.building,
            floor: b.floor,
            location: b.location.to_geojson(),
            is_accessible: b.is_accessible,
            gender: b.gender,
            rating: b.rating,
            review_count: b.review_count,
            created_by: b.created_by,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct BathroomListResponse {
    pub bathrooms: Vec<BathroomResponse>,
    pub total: u64,
    pub page: u32,
    pub pages: u64,
}

impl From<Page<Bathroom>> for BathroomListResponse {
    fn from(page: Page<Bathroom>) -> Self {
        let pages = page.pages();
        let page = page.map(BathroomResponse::from);
        Self {
            bathrooms: page.items,
            total: page.total,
            page: page.page,
            pages,
        }
    }
}

#[derive(Serialize)]
pub struct NearbyBathroomResponse {
    #[serde(flatten)]
    pub bathroom: BathroomResponse,
    /// Meters from the query point.
    #[serde(serialize_with = "loomap_core::serde::round_1dp")]
    pub distance: f64,
}

impl From<NearbyBathroom> for NearbyBathroomResponse {
    fn from(n: NearbyBathroom) -> Self {
        Self {
            bathroom: n.bathroom.into(),
            distance: n.distance_m,
        }
    }
}

#[derive(Serialize)]
pub struct NearbyResponse {
    pub bathrooms: Vec<NearbyBathroomResponse>,
}

// ── Request types ────────────────────────────────────────────────────────────

/// Body of both create and update; update treats every field as optional.
#[derive(Deserialize)]
pub struct BathroomRequest {
    pub building: Option<String>,
    pub floor: Option<NumberInput>,
    pub latitude: Option<NumberInput>,
    pub longitude: Option<NumberInput>,
    pub is_accessible: Option<bool>,
    pub gender: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BathroomListQuery {
    pub building: Option<String>,
    pub gender: Option<String>,
    pub is_accessible: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

impl BathroomListQuery {
    fn filter(&self) -> Result<BathroomFilter, ApiError> {
        let gender = self
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::parse::<Gender>)
            .transpose()?;
        Ok(BathroomFilter {
            building: self.building.clone(),
            gender,
            // any value other than "true" filters for inaccessible bathrooms
            is_accessible: self
                .is_accessible
                .as_deref()
                .map(|v| v.trim().eq_ignore_ascii_case("true")),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub max_distance: Option<String>,
}

/// Blank query values count as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<NearbyQuery> for NearbyInput {
    fn from(q: NearbyQuery) -> Self {
        Self {
            latitude: present(q.lat).or(present(q.latitude)).map(NumberInput::Text),
            longitude: present(q.lng).or(present(q.longitude)).map(NumberInput::Text),
            max_distance: present(q.max_distance).map(NumberInput::Text),
        }
    }
}

#[derive(Serialize)]
pub struct CreateBathroomResponse {
    pub message: &'static str,
    pub bathroom_id: Uuid,
}

#[derive(Serialize)]
pub struct UpdateBathroomResponse {
    pub message: &'static str,
    pub bathroom: BathroomResponse,
}

// ── GET /api/bathrooms ───────────────────────────────────────────────────────

pub async fn list_bathrooms(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<BathroomListQuery>,
) -> Result<Json<BathroomListResponse>, ApiError> {
    let usecase = ListBathroomsUseCase {
        repo: state.bathroom_repo(),
    };
    let page = usecase
        .execute(query.filter()?, query.page.page_request())
        .await?;
    Ok(Json(page.into()))
}

// ── GET /api/bathrooms/nearby ────────────────────────────────────────────────

pub async fn nearby_bathrooms(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<NearbyQuery>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let usecase = NearbyBathroomsUseCase {
        repo: state.bathroom_repo(),
    };
    let nearby = usecase.execute(query.into()).await?;
    Ok(Json(NearbyResponse {
        bathrooms: nearby.into_iter().map(NearbyBathroomResponse::from).collect(),
    }))
}

// ── GET /api/bathrooms/{id} ──────────────────────────────────────────────────

pub async fn get_bathroom(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BathroomResponse>, ApiError> {
    let id = parse_id(&id, ApiError::BathroomNotFound)?;
    let usecase = GetBathroomUseCase {
        repo: state.bathroom_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/bathrooms ──────────────────────────────────────────────────────

pub async fn create_bathroom(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<BathroomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateBathroomUseCase {
        repo: state.bathroom_repo(),
    };
    let bathroom = usecase
        .execute(CreateBathroomInput {
            building: body.building,
            floor: body.floor,
            latitude: body.latitude,
            longitude: body.longitude,
            is_accessible: body.is_accessible,
            gender: body.gender,
            created_by: Some(identity.user_id),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBathroomResponse {
            message: "Bathroom added successfully",
            bathroom_id: bathroom.id,
        }),
    ))
}

// ── PUT /api/bathrooms/{id} ──────────────────────────────────────────────────

pub async fn update_bathroom(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<BathroomRequest>,
) -> Result<Json<UpdateBathroomResponse>, ApiError> {
    let id = parse_id(&id, ApiError::BathroomNotFound)?;
    let usecase = UpdateBathroomUseCase {
        repo: state.bathroom_repo(),
    };
    let bathroom = usecase
        .execute(
            id,
            UpdateBathroomInput {
                building: body.building,
                floor: body.floor,
                latitude: body.latitude,
                longitude: body.longitude,
                is_accessible: body.is_accessible,
                gender: body.gender,
            },
        )
        .await?;

    Ok(Json(UpdateBathroomResponse {
        message: "Bathroom updated successfully",
        bathroom: bathroom.into(),
    }))
}

// ── DELETE /api/bathrooms/{id} ───────────────────────────────────────────────

pub async fn delete_bathroom(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, ApiError::BathroomNotFound)?;
    let usecase = DeleteBathroomUseCase {
        bathrooms: state.bathroom_repo(),
        reviews: state.review_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(MessageResponse {
        message: "Bathroom deleted successfully",
    }))
}
