//! Route definitions
//!
//! All API routes are mounted under /api.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{auth, favorites, health, lists, profile, reviews};
use crate::state::AppState;

/// Multipart framing on top of the avatar bytes
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the API router (health routes are mounted separately)
pub fn create_router(max_avatar_bytes: usize) -> Router<AppState> {
    Router::new().nest("/api", api_routes(max_avatar_bytes))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::readiness_check))
}

fn api_routes(max_avatar_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(profile_routes(max_avatar_bytes))
        .merge(favorite_routes())
        .merge(review_routes())
        .merge(list_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh_token))
        .route("/logout", post(auth::logout))
}

fn profile_routes(max_avatar_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route(
            "/profile/avatar",
            post(profile::upload_avatar)
                .layer(DefaultBodyLimit::max(max_avatar_bytes + MULTIPART_OVERHEAD)),
        )
        .route("/check-nickname", get(profile::check_nickname))
}

fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route("/favorites/:place_id", delete(favorites::remove_favorite))
        .route("/favorites/check/:place_id", get(favorites::check_favorite))
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reviews",
            get(reviews::search_reviews).post(reviews::save_review),
        )
        .route("/reviews/place/:place_id", get(reviews::place_reviews))
        .route("/reviews/:id", delete(reviews::delete_review))
        .route("/reviews/:id/like", post(reviews::toggle_like))
}

fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/lists", get(lists::my_lists).post(lists::create_list))
        .route(
            "/lists/:id",
            get(lists::get_list)
                .put(lists::update_list)
                .delete(lists::delete_list),
        )
        .route("/lists/:id/items", post(lists::add_item))
        .route("/lists/:id/items/:place_id", delete(lists::remove_item))
        .route("/users/:user_id/lists", get(lists::user_lists))
}
