//! Movie route handlers

use super::parse_id;
use crate::error::{not_found_error, validation_error, ApiResult, AppError};
use crate::extract::{PathId, Payload, QueryParams};
use crate::models::{
    CreatedResponse, DataResponse, MessageResponse, Movie, MoviePayload, MovieWithGenres,
    PageQuery, PrettyJson, SearchQuery,
};
use crate::state::SharedState;
use axum::{extract::State, http::StatusCode};
use tracing::{debug, info};

const RESOURCE: &str = "Movie";

/// GET /api/movies?page=&limit=
pub async fn list_movies(
    State(state): State<SharedState>,
    params: Result<QueryParams<PageQuery>, AppError>,
) -> ApiResult<PrettyJson<DataResponse<Vec<Movie>>>> {
    // An undecodable query string pages with the defaults
    let params = params.map(|QueryParams(params)| params).unwrap_or_else(|e| {
        debug!("Ignoring paging parameters: {}", e.message());
        PageQuery::default()
    });

    let (limit, offset) = params.limit_offset();
    debug!("Listing movies: limit={}, offset={}", limit, offset);

    let movies = state.store.list_movies(limit, offset).await?;

    Ok(PrettyJson(DataResponse::new(movies)))
}

/// GET /api/movies/{id}
pub async fn get_movie(
    State(state): State<SharedState>,
    PathId(id): PathId,
) -> ApiResult<PrettyJson<DataResponse<Movie>>> {
    debug!("Fetching movie {}", id);
    let movie_id = parse_id(&id).ok_or_else(|| not_found_error(RESOURCE, &id))?;

    let movie = state
        .store
        .find_movie(movie_id)
        .await?
        .ok_or_else(|| not_found_error(RESOURCE, &id))?;

    Ok(PrettyJson(DataResponse::new(movie)))
}

/// GET /api/movies/{id}/with-genres
pub async fn get_movie_with_genres(
    State(state): State<SharedState>,
    PathId(id): PathId,
) -> ApiResult<PrettyJson<DataResponse<MovieWithGenres>>> {
    debug!("Fetching movie {} with genres", id);
    let movie_id = parse_id(&id).ok_or_else(|| not_found_error(RESOURCE, &id))?;

    let movie = state
        .store
        .find_movie_with_genres(movie_id)
        .await?
        .ok_or_else(|| not_found_error(RESOURCE, &id))?;

    Ok(PrettyJson(DataResponse::new(movie)))
}

/// GET /api/movies/search?title=
pub async fn search_movies(
    State(state): State<SharedState>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> ApiResult<PrettyJson<DataResponse<Vec<Movie>>>> {
    let title = params
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| validation_error("Title query parameter is required"))?;

    debug!("Searching movies by title: {}", title);
    let movies = state.store.search_movies(&title).await?;

    Ok(PrettyJson(DataResponse::new(movies)))
}

/// GET /api/movies/genre/{genreId}
pub async fn movies_by_genre(
    State(state): State<SharedState>,
    PathId(genre_id): PathId,
) -> ApiResult<PrettyJson<DataResponse<Vec<Movie>>>> {
    debug!("Listing movies in genre {}", genre_id);
    let movies = match parse_id(&genre_id) {
        Some(genre_id) => state.store.movies_by_genre(genre_id).await?,
        None => Vec::new(),
    };

    Ok(PrettyJson(DataResponse::new(movies)))
}

/// POST /api/movies
pub async fn create_movie(
    State(state): State<SharedState>,
    Payload(payload): Payload<MoviePayload>,
) -> ApiResult<(StatusCode, PrettyJson<CreatedResponse>)> {
    debug!("Creating movie");
    let movie = payload.into_new_movie()?;

    let id = state.store.create_movie(&movie).await?;
    info!("Movie '{}' created with id {}", movie.title, id);

    Ok((
        StatusCode::CREATED,
        PrettyJson(CreatedResponse::new("Movie created successfully", id)),
    ))
}

/// PUT /api/movies/{id}
pub async fn update_movie(
    State(state): State<SharedState>,
    PathId(id): PathId,
    Payload(payload): Payload<MoviePayload>,
) -> ApiResult<PrettyJson<MessageResponse>> {
    debug!("Updating movie {}", id);
    let movie = payload.into_new_movie()?;
    let movie_id = parse_id(&id).ok_or_else(|| not_found_error(RESOURCE, &id))?;

    if state.store.update_movie(movie_id, &movie).await? == 0 {
        return Err(not_found_error(RESOURCE, &id));
    }
    info!("Movie {} updated", movie_id);

    Ok(PrettyJson(MessageResponse::new("Movie updated successfully")))
}

/// DELETE /api/movies/{id}
pub async fn delete_movie(
    State(state): State<SharedState>,
    PathId(id): PathId,
) -> ApiResult<PrettyJson<MessageResponse>> {
    debug!("Deleting movie {}", id);
    let movie_id = parse_id(&id).ok_or_else(|| not_found_error(RESOURCE, &id))?;

    if state.store.delete_movie(movie_id).await? == 0 {
        return Err(not_found_error(RESOURCE, &id));
    }
    info!("Movie {} deleted", movie_id);

    Ok(PrettyJson(MessageResponse::new("Movie deleted successfully")))
}
