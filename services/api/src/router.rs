use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use loomap_core::health::{health_json, healthz, readyz};
use loomap_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, logout, register},
    bathroom::{
        create_bathroom, delete_bathroom, get_bathroom, list_bathrooms, nearby_bathrooms,
        update_bathroom,
    },
    geocode::convert_address,
    review::{create_review, delete_review, get_review, list_reviews, update_review},
    user::{get_me, get_my_reviews},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/health", get(health_json))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        // Users
        .route("/api/users/me", get(get_me))
        .route("/api/users/me/reviews", get(get_my_reviews))
        // Bathrooms
        .route("/api/bathrooms", get(list_bathrooms).post(create_bathroom))
        .route("/api/bathrooms/nearby", get(nearby_bathrooms))
        .route(
            "/api/bathrooms/{id}",
            get(get_bathroom).put(update_bathroom).delete(delete_bathroom),
        )
        // Reviews
        .route(
            "/api/bathrooms/{id}/reviews",
            get(list_reviews).post(create_review),
        )
        .route(
            "/api/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        // Geocoding
        .route("/api/convert-address", post(convert_address))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
}
