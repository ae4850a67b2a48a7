//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod genres;
mod movies;
mod reviews;
mod users;

use crate::config::Settings;
use crate::models::{PrettyJson, Status};
use crate::state::SharedState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::get,
    Router,
};
use serde::Serialize;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Request bodies (JSON or form) are capped at 50 MiB
pub const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))

        // Movie routes; the static segments win over `{id}`
        .route("/api/movies", get(movies::list_movies).post(movies::create_movie))
        .route("/api/movies/search", get(movies::search_movies))
        .route("/api/movies/genre/{genre_id}", get(movies::movies_by_genre))
        .route(
            "/api/movies/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/api/movies/{id}/with-genres", get(movies::get_movie_with_genres))

        // Genre routes
        .route("/api/genres", get(genres::list_genres).post(genres::create_genre))
        .route("/api/genres/{id}", get(genres::get_genre))

        // User routes
        .route("/api/users", get(users::list_users))
        .route("/api/users/{id}", get(users::get_user))
        .route("/api/users/{id}/reviews", get(users::user_reviews))

        // Review routes
        .route("/api/reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route("/api/reviews/movie/{movie_id}", get(reviews::movie_reviews))

        // Apply middleware and state
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings; no configured origins means any origin
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

/// Path ids that are not integers cannot match any row
pub(crate) fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

#[derive(Serialize)]
struct RootResponse {
    info: &'static str,
}

/// GET /
async fn root() -> PrettyJson<RootResponse> {
    PrettyJson(RootResponse {
        info: "Movie API Backend",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: Status,
    message: &'static str,
    timestamp: String,
    version: &'static str,
}

/// Health check endpoint
async fn health_check() -> PrettyJson<HealthResponse> {
    PrettyJson(HealthResponse {
        status: Status::Success,
        message: "Server is running fine.",
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
