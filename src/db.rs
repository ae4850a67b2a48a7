//! Store access
//!
//! Every handler talks to the relational store through [`MovieStore`]. The
//! production implementation is [`PgStore`], a deadpool-managed PostgreSQL
//! pool built once at startup; tests swap in the in-memory store.

#[cfg(test)]
pub mod memory;
mod postgres;
pub mod queries;

pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{Genre, Movie, MovieWithGenres, NewGenre, NewMovie, NewReview, Review, User};
use async_trait::async_trait;

/// One method per query the API issues. Each call is a single statement;
/// nothing here spans a transaction.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Movies ordered by id, `limit` rows starting at `offset`
    async fn list_movies(&self, limit: i64, offset: i64) -> Result<Vec<Movie>, AppError>;

    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, AppError>;

    async fn find_movie_with_genres(&self, id: i32) -> Result<Option<MovieWithGenres>, AppError>;

    /// Case-insensitive literal substring match on the title
    async fn search_movies(&self, title: &str) -> Result<Vec<Movie>, AppError>;

    async fn movies_by_genre(&self, genre_id: i32) -> Result<Vec<Movie>, AppError>;

    /// Returns the id assigned by the store
    async fn create_movie(&self, movie: &NewMovie) -> Result<i32, AppError>;

    /// Returns the number of rows matched
    async fn update_movie(&self, id: i32, movie: &NewMovie) -> Result<u64, AppError>;

    /// Returns the number of rows removed
    async fn delete_movie(&self, id: i32) -> Result<u64, AppError>;

    async fn list_genres(&self) -> Result<Vec<Genre>, AppError>;

    async fn find_genre(&self, id: i32) -> Result<Option<Genre>, AppError>;

    async fn create_genre(&self, genre: &NewGenre) -> Result<i32, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Reviews written by a user, each carrying `movie_title`
    async fn reviews_by_user(&self, user_id: i32) -> Result<Vec<Review>, AppError>;

    /// All reviews, each carrying `username` and `movie_title`
    async fn list_reviews(&self) -> Result<Vec<Review>, AppError>;

    /// Reviews of one movie, each carrying `username`
    async fn reviews_by_movie(&self, movie_id: i32) -> Result<Vec<Review>, AppError>;

    async fn create_review(&self, review: &NewReview) -> Result<i32, AppError>;
}
