//! User route handlers

use super::parse_id;
use crate::error::{not_found_error, ApiResult};
use crate::extract::PathId;
use crate::models::{DataResponse, PrettyJson, Review, User};
use crate::state::SharedState;
use axum::extract::State;
use tracing::debug;

/// GET /api/users
pub async fn list_users(
    State(state): State<SharedState>,
) -> ApiResult<PrettyJson<DataResponse<Vec<User>>>> {
    debug!("Listing users");
    let users = state.store.list_users().await?;
    Ok(PrettyJson(DataResponse::new(users)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<SharedState>,
    PathId(id): PathId,
) -> ApiResult<PrettyJson<DataResponse<User>>> {
    debug!("Fetching user {}", id);
    let user_id = parse_id(&id).ok_or_else(|| not_found_error("User", &id))?;

    let user = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| not_found_error("User", &id))?;

    Ok(PrettyJson(DataResponse::new(user)))
}

/// GET /api/users/{id}/reviews
pub async fn user_reviews(
    State(state): State<SharedState>,
    PathId(id): PathId,
) -> ApiResult<PrettyJson<DataResponse<Vec<Review>>>> {
    debug!("Listing reviews by user {}", id);
    let reviews = match parse_id(&id) {
        Some(user_id) => state.store.reviews_by_user(user_id).await?,
        None => Vec::new(),
    };

    Ok(PrettyJson(DataResponse::new(reviews)))
}
