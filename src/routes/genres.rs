//! Genre route handlers

use super::parse_id;
use crate::error::{not_found_error, ApiResult};
use crate::extract::{PathId, Payload};
use crate::models::{CreatedResponse, DataResponse, Genre, GenrePayload, PrettyJson};
use crate::state::SharedState;
use axum::{extract::State, http::StatusCode};
use tracing::{debug, info};

/// GET /api/genres
pub async fn list_genres(
    State(state): State<SharedState>,
) -> ApiResult<PrettyJson<DataResponse<Vec<Genre>>>> {
    debug!("Listing genres");
    let genres = state.store.list_genres().await?;
    Ok(PrettyJson(DataResponse::new(genres)))
}

/// GET /api/genres/{id}
pub async fn get_genre(
    State(state): State<SharedState>,
    PathId(id): PathId,
) -> ApiResult<PrettyJson<DataResponse<Genre>>> {
    debug!("Fetching genre {}", id);
    let genre_id = parse_id(&id).ok_or_else(|| not_found_error("Genre", &id))?;

    let genre = state
        .store
        .find_genre(genre_id)
        .await?
        .ok_or_else(|| not_found_error("Genre", &id))?;

    Ok(PrettyJson(DataResponse::new(genre)))
}

/// POST /api/genres
pub async fn create_genre(
    State(state): State<SharedState>,
    Payload(payload): Payload<GenrePayload>,
) -> ApiResult<(StatusCode, PrettyJson<CreatedResponse>)> {
    debug!("Creating genre");
    let genre = payload.into_new_genre()?;

    let id = state.store.create_genre(&genre).await?;
    info!("Genre '{}' created with id {}", genre.name, id);

    Ok((
        StatusCode::CREATED,
        PrettyJson(CreatedResponse::new("Genre created successfully", id)),
    ))
}
