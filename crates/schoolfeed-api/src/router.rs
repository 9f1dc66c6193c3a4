//! Axum router construction for the feed API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for the browser client.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the feed server.
///
/// See [`handlers`] for the endpoint table. CORS allows any origin, method
/// and header, which the bearer-token scheme tolerates because no cookies
/// are involved.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // Auth
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/me", get(handlers::get_me).patch(handlers::update_me))
        // Schools
        .route("/api/schools", get(handlers::list_schools))
        .route("/api/schools/{id}", get(handlers::get_school))
        .route("/api/schools/{id}/posts", get(handlers::list_school_posts))
        .route(
            "/api/schools/{id}/follow",
            get(handlers::get_follow)
                .post(handlers::follow)
                .delete(handlers::unfollow),
        )
        .route("/api/following", get(handlers::list_following))
        // Posts
        .route(
            "/api/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/api/posts/{id}", get(handlers::get_post))
        .route(
            "/api/posts/{id}/like",
            post(handlers::like).delete(handlers::unlike),
        )
        .route(
            "/api/posts/{id}/save",
            post(handlers::save).delete(handlers::unsave),
        )
        .route("/api/feed", get(handlers::feed))
        .route("/api/saved", get(handlers::list_saved))
        // Reference data
        .route("/api/locations", get(handlers::list_locations))
        .route("/api/locations/{state}", get(handlers::list_cities))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
