use sea_orm::DatabaseConnection;

use loomap_auth_types::identity::JwtSecret;

use crate::infra::db::{DbBathroomRepository, DbReviewRepository, DbUserRepository};
use crate::infra::geocoder::NominatimGeocoder;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub cookie_secure: bool,
    pub geocoder: NominatimGeocoder,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn bathroom_repo(&self) -> DbBathroomRepository {
        DbBathroomRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }
}

impl JwtSecret for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
