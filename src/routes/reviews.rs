//! Review route handlers

use super::parse_id;
use crate::error::ApiResult;
use crate::extract::{PathId, Payload};
use crate::models::{CreatedResponse, DataResponse, PrettyJson, Review, ReviewPayload};
use crate::state::SharedState;
use axum::{extract::State, http::StatusCode};
use tracing::{debug, info};

/// GET /api/reviews
pub async fn list_reviews(
    State(state): State<SharedState>,
) -> ApiResult<PrettyJson<DataResponse<Vec<Review>>>> {
    debug!("Listing reviews");
    let reviews = state.store.list_reviews().await?;
    Ok(PrettyJson(DataResponse::new(reviews)))
}

/// GET /api/reviews/movie/{movieId}
pub async fn movie_reviews(
    State(state): State<SharedState>,
    PathId(movie_id): PathId,
) -> ApiResult<PrettyJson<DataResponse<Vec<Review>>>> {
    debug!("Listing reviews of movie {}", movie_id);
    let reviews = match parse_id(&movie_id) {
        Some(movie_id) => state.store.reviews_by_movie(movie_id).await?,
        None => Vec::new(),
    };

    Ok(PrettyJson(DataResponse::new(reviews)))
}

/// POST /api/reviews
pub async fn create_review(
    State(state): State<SharedState>,
    Payload(payload): Payload<ReviewPayload>,
) -> ApiResult<(StatusCode, PrettyJson<CreatedResponse>)> {
    debug!("Creating review");
    let review = payload.into_new_review()?;

    let id = state.store.create_review(&review).await?;
    info!(
        "Review {} created for movie {} by user {} (rating {})",
        id, review.movie_id, review.user_id, review.rating
    );

    Ok((
        StatusCode::CREATED,
        PrettyJson(CreatedResponse::new("Review created successfully", id)),
    ))
}
