//! In-memory store used by the handler tests

use super::MovieStore;
use crate::error::AppError;
use crate::models::{Genre, Movie, MovieWithGenres, NewGenre, NewMovie, NewReview, Review, User};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    movies: Vec<Movie>,
    genres: Vec<Genre>,
    movie_genres: Vec<(i32, i32)>,
    users: Vec<User>,
    reviews: Vec<Review>,
    next_id: i32,
}

impl Tables {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn movie_title(&self, movie_id: i32) -> Option<String> {
        self.movies
            .iter()
            .find(|m| m.movie_id == movie_id)
            .map(|m| m.title.clone())
    }

    fn username(&self, user_id: i32) -> Option<String> {
        self.users
            .iter()
            .find(|u| u.user_id == user_id)
            .map(|u| u.username.clone())
    }
}

/// Store holding every table in a mutex-guarded vector. Optionally fails every
/// call with a fixed message to emulate a broken connection.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        if let Some(message) = &self.failure {
            return Err(AppError::Store(message.clone()));
        }
        self.tables
            .lock()
            .map_err(|e| AppError::Store(e.to_string()))
    }

    pub fn add_movie(&self, title: &str) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.allocate_id();
        tables.movies.push(Movie {
            movie_id: id,
            title: title.to_string(),
            release_year: None,
            duration_minutes: None,
            plot_summary: None,
            rating: None,
        });
        id
    }

    pub fn add_genre(&self, name: &str) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.allocate_id();
        tables.genres.push(Genre {
            genre_id: id,
            name: name.to_string(),
            description: None,
        });
        id
    }

    pub fn link_genre(&self, movie_id: i32, genre_id: i32) {
        self.tables.lock().unwrap().movie_genres.push((movie_id, genre_id));
    }

    pub fn add_user(&self, username: &str, email: &str) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.allocate_id();
        tables.users.push(User {
            user_id: id,
            username: username.to_string(),
            email: email.to_string(),
            is_active: Some(true),
            created_at: Some(Utc::now()),
        });
        id
    }

    pub fn movie(&self, id: i32) -> Option<Movie> {
        let tables = self.tables.lock().unwrap();
        tables.movies.iter().find(|m| m.movie_id == id).cloned()
    }

    pub fn review_count(&self) -> usize {
        self.tables.lock().unwrap().reviews.len()
    }
}

/// Strip the joined columns and re-attach the requested ones
fn project(tables: &Tables, review: &Review, username: bool, movie_title: bool) -> Review {
    Review {
        username: username.then(|| tables.username(review.user_id)).flatten(),
        movie_title: movie_title.then(|| tables.movie_title(review.movie_id)).flatten(),
        ..review.clone()
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list_movies(&self, limit: i64, offset: i64) -> Result<Vec<Movie>, AppError> {
        let tables = self.tables()?;
        let mut movies = tables.movies.clone();
        movies.sort_by_key(|m| m.movie_id);
        Ok(movies
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, AppError> {
        let tables = self.tables()?;
        Ok(tables.movies.iter().find(|m| m.movie_id == id).cloned())
    }

    async fn find_movie_with_genres(&self, id: i32) -> Result<Option<MovieWithGenres>, AppError> {
        let tables = self.tables()?;
        let Some(movie) = tables.movies.iter().find(|m| m.movie_id == id).cloned() else {
            return Ok(None);
        };

        let mut names: Vec<String> = tables
            .movie_genres
            .iter()
            .filter(|(movie_id, _)| *movie_id == id)
            .filter_map(|(_, genre_id)| tables.genres.iter().find(|g| g.genre_id == *genre_id))
            .map(|g| g.name.clone())
            .collect();
        names.sort();

        Ok(Some(MovieWithGenres {
            movie,
            genres: (!names.is_empty()).then(|| names.join(",")),
        }))
    }

    async fn search_movies(&self, title: &str) -> Result<Vec<Movie>, AppError> {
        let tables = self.tables()?;
        let needle = title.to_lowercase();
        Ok(tables
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn movies_by_genre(&self, genre_id: i32) -> Result<Vec<Movie>, AppError> {
        let tables = self.tables()?;
        Ok(tables
            .movies
            .iter()
            .filter(|m| tables.movie_genres.contains(&(m.movie_id, genre_id)))
            .cloned()
            .collect())
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<i32, AppError> {
        let mut tables = self.tables()?;
        let id = tables.allocate_id();
        tables.movies.push(movie.clone().into_movie(id));
        Ok(id)
    }

    async fn update_movie(&self, id: i32, movie: &NewMovie) -> Result<u64, AppError> {
        let mut tables = self.tables()?;
        match tables.movies.iter_mut().find(|m| m.movie_id == id) {
            Some(row) => {
                *row = movie.clone().into_movie(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_movie(&self, id: i32) -> Result<u64, AppError> {
        let mut tables = self.tables()?;
        let before = tables.movies.len();
        tables.movies.retain(|m| m.movie_id != id);
        Ok((before - tables.movies.len()) as u64)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, AppError> {
        Ok(self.tables()?.genres.clone())
    }

    async fn find_genre(&self, id: i32) -> Result<Option<Genre>, AppError> {
        let tables = self.tables()?;
        Ok(tables.genres.iter().find(|g| g.genre_id == id).cloned())
    }

    async fn create_genre(&self, genre: &NewGenre) -> Result<i32, AppError> {
        let mut tables = self.tables()?;
        let id = tables.allocate_id();
        tables.genres.push(Genre {
            genre_id: id,
            name: genre.name.clone(),
            description: genre.description.clone(),
        });
        Ok(id)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables()?.users.clone())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.user_id == id).cloned())
    }

    async fn reviews_by_user(&self, user_id: i32) -> Result<Vec<Review>, AppError> {
        let tables = self.tables()?;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id && tables.movie_title(r.movie_id).is_some())
            .map(|r| project(&tables, r, false, true))
            .collect())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        let tables = self.tables()?;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| tables.username(r.user_id).is_some() && tables.movie_title(r.movie_id).is_some())
            .map(|r| project(&tables, r, true, true))
            .collect())
    }

    async fn reviews_by_movie(&self, movie_id: i32) -> Result<Vec<Review>, AppError> {
        let tables = self.tables()?;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.movie_id == movie_id && tables.username(r.user_id).is_some())
            .map(|r| project(&tables, r, true, false))
            .collect())
    }

    async fn create_review(&self, review: &NewReview) -> Result<i32, AppError> {
        let mut tables = self.tables()?;
        let id = tables.allocate_id();
        tables.reviews.push(Review {
            review_id: id,
            movie_id: review.movie_id,
            user_id: review.user_id,
            rating: review.rating,
            review_text: review.review_text.clone(),
            username: None,
            movie_title: None,
        });
        Ok(id)
    }
}
