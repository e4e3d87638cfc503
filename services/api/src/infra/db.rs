use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, Func},
};
use uuid::Uuid;

use loomap_api_schema::{bathrooms, reviews, users};
use loomap_core::pagination::fetch_page;
use loomap_domain::geo::{BoundingBox, GeoPoint};
use loomap_domain::location::Gender;
use loomap_domain::pagination::{Page, PageRequest};
use loomap_domain::rating::{RatingDimension, RatingSummary, Ratings, Score};

use crate::domain::repository::{BathroomRepository, ReviewRepository, UserRepository};
use crate::domain::types::{Bathroom, BathroomFilter, BathroomPatch, Review, User};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| ApiError::from_db(e, ApiError::UserAlreadyExists, "create user"))?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Bathroom repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBathroomRepository {
    pub db: DatabaseConnection,
}

impl BathroomRepository for DbBathroomRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bathroom>, ApiError> {
        let model = bathrooms::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find bathroom by id")?;
        Ok(model.map(bathroom_from_model).transpose()?)
    }

    async fn list(
        &self,
        filter: &BathroomFilter,
        page: PageRequest,
    ) -> Result<Page<Bathroom>, ApiError> {
        let mut condition = Condition::all();
        if let Some(ref building) = filter.building {
            let pattern = format!("%{}%", escape_like(&building.to_lowercase()));
            condition = condition.add(
                Expr::expr(Func::lower(Expr::col(bathrooms::Column::Building))).like(pattern),
            );
        }
        if let Some(gender) = filter.gender {
            condition = condition.add(bathrooms::Column::Gender.eq(gender.as_str()));
        }
        if let Some(is_accessible) = filter.is_accessible {
            condition = condition.add(bathrooms::Column::IsAccessible.eq(is_accessible));
        }

        let select = bathrooms::Entity::find()
            .filter(condition)
            .order_by_desc(bathrooms::Column::CreatedAt)
            .order_by_desc(bathrooms::Column::Id);
        let page = fetch_page(select, &self.db, page)
            .await
            .context("list bathrooms")?;
        Ok(page.try_map(bathroom_from_model)?)
    }

    async fn list_within(&self, bbox: &BoundingBox) -> Result<Vec<Bathroom>, ApiError> {
        let lng = bathrooms::Column::Longitude;
        // a box past the antimeridian splits into two longitude ranges
        let longitude = if !bbox.wraps() {
            Condition::all().add(lng.between(bbox.min_longitude, bbox.max_longitude))
        } else if bbox.max_longitude > 180.0 {
            Condition::any()
                .add(lng.gte(bbox.min_longitude))
                .add(lng.lte(bbox.max_longitude - 360.0))
        } else {
            Condition::any()
                .add(lng.lte(bbox.max_longitude))
                .add(lng.gte(bbox.min_longitude + 360.0))
        };

        let models = bathrooms::Entity::find()
            .filter(bathrooms::Column::Latitude.between(bbox.min_latitude, bbox.max_latitude))
            .filter(longitude)
            .all(&self.db)
            .await
            .context("list bathrooms within bounding box")?;
        Ok(models
            .into_iter()
            .map(bathroom_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn count(&self) -> Result<u64, ApiError> {
        Ok(bathrooms::Entity::find()
            .count(&self.db)
            .await
            .context("count bathrooms")?)
    }

    async fn create(&self, bathroom: &Bathroom) -> Result<(), ApiError> {
        bathrooms::ActiveModel {
            id: Set(bathroom.id),
            building: Set(bathroom.building.clone()),
            floor: Set(bathroom.floor),
            latitude: Set(bathroom.location.latitude),
            longitude: Set(bathroom.location.longitude),
            is_accessible: Set(bathroom.is_accessible),
            gender: Set(bathroom.gender.as_str().to_owned()),
            created_by: Set(bathroom.created_by),
            rating: Set(bathroom.rating),
            review_count: Set(review_count_column(bathroom.review_count)),
            created_at: Set(bathroom.created_at),
            updated_at: Set(bathroom.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create bathroom")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &BathroomPatch) -> Result<bool, ApiError> {
        let mut am = bathrooms::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref building) = patch.building {
            am.building = Set(building.clone());
        }
        if let Some(floor) = patch.floor {
            am.floor = Set(floor);
        }
        if let Some(location) = patch.location {
            am.latitude = Set(location.latitude);
            am.longitude = Set(location.longitude);
        }
        if let Some(is_accessible) = patch.is_accessible {
            am.is_accessible = Set(is_accessible);
        }
        if let Some(gender) = patch.gender {
            am.gender = Set(gender.as_str().to_owned());
        }
        let result = bathrooms::Entity::update_many()
            .set(am)
            .filter(bathrooms::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update bathroom")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_rating(&self, id: Uuid, summary: RatingSummary) -> Result<(), ApiError> {
        bathrooms::Entity::update_many()
            .col_expr(bathrooms::Column::Rating, Expr::value(summary.average))
            .col_expr(
                bathrooms::Column::ReviewCount,
                Expr::value(review_count_column(summary.count)),
            )
            .filter(bathrooms::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set bathroom rating")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = bathrooms::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete bathroom")?;
        Ok(result.rows_affected > 0)
    }
}

fn bathroom_from_model(model: bathrooms::Model) -> anyhow::Result<Bathroom> {
    let gender = model
        .gender
        .parse::<Gender>()
        .with_context(|| format!("bathroom {} has unknown gender {:?}", model.id, model.gender))?;
    Ok(Bathroom {
        id: model.id,
        building: model.building,
        floor: model.floor,
        location: GeoPoint {
            latitude: model.latitude,
            longitude: model.longitude,
        },
        is_accessible: model.is_accessible,
        gender,
        created_by: model.created_by,
        rating: model.rating,
        review_count: u32::try_from(model.review_count).unwrap_or(0),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn review_count_column(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Escape `LIKE` wildcards; PostgreSQL's default escape character is `\`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, ApiError> {
        let model = reviews::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find review by id")?;
        Ok(model.map(review_from_model).transpose()?)
    }

    async fn list_by_bathroom(
        &self,
        bathroom_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Review>, ApiError> {
        let select = reviews::Entity::find()
            .filter(reviews::Column::BathroomId.eq(bathroom_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id);
        let page = fetch_page(select, &self.db, page)
            .await
            .context("list reviews by bathroom")?;
        Ok(page.try_map(review_from_model)?)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Review>, ApiError> {
        let select = reviews::Entity::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id);
        let page = fetch_page(select, &self.db, page)
            .await
            .context("list reviews by user")?;
        Ok(page.try_map(review_from_model)?)
    }

    async fn ratings_for_bathroom(&self, bathroom_id: Uuid) -> Result<Vec<Ratings>, ApiError> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::BathroomId.eq(bathroom_id))
            .all(&self.db)
            .await
            .context("load bathroom ratings")?;
        Ok(models
            .iter()
            .map(|m| ratings_from_columns(m.rating, m.cleanliness, m.privacy, m.accessibility))
            .collect::<anyhow::Result<_>>()?)
    }

    async fn create(&self, review: &Review) -> Result<(), ApiError> {
        let [rating, cleanliness, privacy, accessibility] = ratings_to_columns(&review.ratings);
        reviews::ActiveModel {
            id: Set(review.id),
            bathroom_id: Set(review.bathroom_id),
            user_id: Set(review.user_id),
            rating: Set(rating),
            cleanliness: Set(cleanliness),
            privacy: Set(privacy),
            accessibility: Set(accessibility),
            best_for: Set(review.best_for.clone()),
            comment: Set(review.comment.clone()),
            created_at: Set(review.created_at),
            updated_at: Set(review.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create review")?;
        Ok(())
    }

    async fn update(&self, review: &Review) -> Result<(), ApiError> {
        let [rating, cleanliness, privacy, accessibility] = ratings_to_columns(&review.ratings);
        let am = reviews::ActiveModel {
            rating: Set(rating),
            cleanliness: Set(cleanliness),
            privacy: Set(privacy),
            accessibility: Set(accessibility),
            best_for: Set(review.best_for.clone()),
            comment: Set(review.comment.clone()),
            updated_at: Set(review.updated_at),
            ..Default::default()
        };
        reviews::Entity::update_many()
            .set(am)
            .filter(reviews::Column::Id.eq(review.id))
            .exec(&self.db)
            .await
            .context("update review")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = reviews::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_bathroom(&self, bathroom_id: Uuid) -> Result<u64, ApiError> {
        let result = reviews::Entity::delete_many()
            .filter(reviews::Column::BathroomId.eq(bathroom_id))
            .exec(&self.db)
            .await
            .context("delete reviews by bathroom")?;
        Ok(result.rows_affected)
    }
}

fn review_from_model(model: reviews::Model) -> anyhow::Result<Review> {
    let ratings = ratings_from_columns(
        model.rating,
        model.cleanliness,
        model.privacy,
        model.accessibility,
    )
    .with_context(|| format!("review {}", model.id))?;
    Ok(Review {
        id: model.id,
        bathroom_id: model.bathroom_id,
        user_id: model.user_id,
        ratings,
        best_for: model.best_for,
        comment: model.comment,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// `[rating, cleanliness, privacy, accessibility]`
fn ratings_to_columns(ratings: &Ratings) -> [Option<i16>; 4] {
    let col = |score: Score| Some(i16::from(score.get()));
    match *ratings {
        Ratings::Single { rating } => [col(rating), None, None, None],
        Ratings::Detailed {
            cleanliness,
            privacy,
            accessibility,
        } => [None, col(cleanliness), col(privacy), col(accessibility)],
    }
}

fn ratings_from_columns(
    rating: Option<i16>,
    cleanliness: Option<i16>,
    privacy: Option<i16>,
    accessibility: Option<i16>,
) -> anyhow::Result<Ratings> {
    let score = |dimension, value: i16| Score::new(dimension, i64::from(value));
    match (rating, cleanliness, privacy, accessibility) {
        (Some(r), None, None, None) => Ok(Ratings::Single {
            rating: score(RatingDimension::Rating, r)?,
        }),
        (None, Some(c), Some(p), Some(a)) => Ok(Ratings::Detailed {
            cleanliness: score(RatingDimension::Cleanliness, c)?,
            privacy: score(RatingDimension::Privacy, p)?,
            accessibility: score(RatingDimension::Accessibility, a)?,
        }),
        _ => anyhow::bail!("stored ratings mix single and detailed forms"),
    }
}
