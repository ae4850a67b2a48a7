//! PostgreSQL-backed store
//!
//! Handles connection pooling and maps rows onto the API models.

use super::queries::{self, contains_pattern};
use super::MovieStore;
use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::{Genre, Movie, MovieWithGenres, NewGenre, NewMovie, NewReview, Review, User};
use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Object, Pool, PoolConfig, RecyclingMethod, Runtime};
use std::future::Future;
use std::time::Duration;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, info};

/// Store backed by a deadpool-managed PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
    query_timeout: Duration,
}

impl PgStore {
    /// Build the pool and make sure it can actually serve a query
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = Self::create_pool(config)?;
        let store = Self {
            pool,
            query_timeout: config.query_timeout,
        };

        // Test connection
        let client = store.client().await?;
        store.bounded(client.query_one("SELECT 1", &[])).await?;
        drop(client);

        info!(
            "Database pool established ({}@{}:{}/{}, max {} connections, TLS: {})",
            config.user, config.host, config.port, config.database, config.max_pool_size, config.use_tls
        );

        Ok(store)
    }

    /// Create a connection pool with given configuration
    fn create_pool(config: &DatabaseConfig) -> Result<Pool, AppError> {
        let mut cfg = Config::new();
        cfg.host = Some(config.host.clone());
        cfg.port = Some(config.port);
        cfg.user = Some(config.user.clone());
        cfg.password = Some(config.password.clone());
        cfg.dbname = Some(config.database.clone());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_config = PoolConfig::new(config.max_pool_size);
        pool_config.timeouts.wait = Some(config.query_timeout);
        pool_config.timeouts.create = Some(config.query_timeout);
        pool_config.timeouts.recycle = Some(config.query_timeout);
        cfg.pool = Some(pool_config);

        let pool = if config.use_tls {
            let certs = rustls_native_certs::load_native_certs();
            let mut root_store = rustls::RootCertStore::empty();
            for cert in certs.certs {
                root_store.add(cert).ok();
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);
            cfg.create_pool(Some(Runtime::Tokio1), tls)
        } else {
            cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        };

        pool.map_err(|e| AppError::Store(format!("Failed to create pool: {}", e)))
    }

    async fn client(&self) -> Result<Object, AppError> {
        Ok(self.pool.get().await?)
    }

    /// Run one statement under the configured time bound
    async fn bounded<T, F>(&self, query: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, tokio_postgres::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AppError::Store(format!(
                "Query timed out after {} seconds",
                self.query_timeout.as_secs()
            ))),
        }
    }

    async fn movies(&self, sql: &str, id: i32) -> Result<Vec<Movie>, AppError> {
        let client = self.client().await?;
        let rows = self.bounded(client.query(sql, &[&id])).await?;
        Ok(rows.iter().map(movie_from_row).collect::<Result<_, _>>()?)
    }

    async fn reviews(&self, sql: &str, id: i32) -> Result<Vec<Review>, AppError> {
        let client = self.client().await?;
        let rows = self.bounded(client.query(sql, &[&id])).await?;
        Ok(rows.iter().map(review_from_row).collect::<Result<_, _>>()?)
    }
}

fn movie_from_row(row: &Row) -> Result<Movie, tokio_postgres::Error> {
    Ok(Movie {
        movie_id: row.try_get("movie_id")?,
        title: row.try_get("title")?,
        release_year: row.try_get("release_year")?,
        duration_minutes: row.try_get("duration_minutes")?,
        plot_summary: row.try_get("plot_summary")?,
        rating: row.try_get("rating")?,
    })
}

fn genre_from_row(row: &Row) -> Result<Genre, tokio_postgres::Error> {
    Ok(Genre {
        genre_id: row.try_get("genre_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
    })
}

fn user_from_row(row: &Row) -> Result<User, tokio_postgres::Error> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Joined columns are only read when the query selected them
fn joined_text(row: &Row, column: &str) -> Result<Option<String>, tokio_postgres::Error> {
    if row.columns().iter().any(|c| c.name() == column) {
        row.try_get(column)
    } else {
        Ok(None)
    }
}

fn review_from_row(row: &Row) -> Result<Review, tokio_postgres::Error> {
    Ok(Review {
        review_id: row.try_get("review_id")?,
        movie_id: row.try_get("movie_id")?,
        user_id: row.try_get("user_id")?,
        rating: row.try_get("rating")?,
        review_text: row.try_get("review_text")?,
        username: joined_text(row, "username")?,
        movie_title: joined_text(row, "movie_title")?,
    })
}

#[async_trait]
impl MovieStore for PgStore {
    async fn list_movies(&self, limit: i64, offset: i64) -> Result<Vec<Movie>, AppError> {
        debug!("Listing movies (limit {}, offset {})", limit, offset);
        let client = self.client().await?;
        let rows = self
            .bounded(client.query(queries::LIST_MOVIES, &[&limit, &offset]))
            .await?;
        Ok(rows.iter().map(movie_from_row).collect::<Result<_, _>>()?)
    }

    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, AppError> {
        let client = self.client().await?;
        let row = self.bounded(client.query_opt(queries::GET_MOVIE, &[&id])).await?;
        Ok(row.as_ref().map(movie_from_row).transpose()?)
    }

    async fn find_movie_with_genres(&self, id: i32) -> Result<Option<MovieWithGenres>, AppError> {
        let client = self.client().await?;
        let row = self
            .bounded(client.query_opt(queries::GET_MOVIE_WITH_GENRES, &[&id]))
            .await?;

        match row {
            Some(row) => Ok(Some(MovieWithGenres {
                movie: movie_from_row(&row)?,
                genres: row.try_get("genres")?,
            })),
            None => Ok(None),
        }
    }

    async fn search_movies(&self, title: &str) -> Result<Vec<Movie>, AppError> {
        let pattern = contains_pattern(title);
        let client = self.client().await?;
        let rows = self
            .bounded(client.query(queries::SEARCH_MOVIES, &[&pattern]))
            .await?;
        Ok(rows.iter().map(movie_from_row).collect::<Result<_, _>>()?)
    }

    async fn movies_by_genre(&self, genre_id: i32) -> Result<Vec<Movie>, AppError> {
        self.movies(queries::MOVIES_BY_GENRE, genre_id).await
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<i32, AppError> {
        let client = self.client().await?;
        let row = self
            .bounded(client.query_one(
                queries::INSERT_MOVIE,
                &[
                    &movie.title,
                    &movie.release_year,
                    &movie.duration_minutes,
                    &movie.plot_summary,
                    &movie.rating,
                ],
            ))
            .await?;
        Ok(row.try_get("movie_id")?)
    }

    async fn update_movie(&self, id: i32, movie: &NewMovie) -> Result<u64, AppError> {
        let client = self.client().await?;
        self.bounded(client.execute(
            queries::UPDATE_MOVIE,
            &[
                &movie.title,
                &movie.release_year,
                &movie.duration_minutes,
                &movie.plot_summary,
                &movie.rating,
                &id,
            ],
        ))
        .await
    }

    async fn delete_movie(&self, id: i32) -> Result<u64, AppError> {
        let client = self.client().await?;
        self.bounded(client.execute(queries::DELETE_MOVIE, &[&id])).await
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, AppError> {
        let client = self.client().await?;
        let rows = self.bounded(client.query(queries::LIST_GENRES, &[])).await?;
        Ok(rows.iter().map(genre_from_row).collect::<Result<_, _>>()?)
    }

    async fn find_genre(&self, id: i32) -> Result<Option<Genre>, AppError> {
        let client = self.client().await?;
        let row = self.bounded(client.query_opt(queries::GET_GENRE, &[&id])).await?;
        Ok(row.as_ref().map(genre_from_row).transpose()?)
    }

    async fn create_genre(&self, genre: &NewGenre) -> Result<i32, AppError> {
        let client = self.client().await?;
        let row = self
            .bounded(client.query_one(queries::INSERT_GENRE, &[&genre.name, &genre.description]))
            .await?;
        Ok(row.try_get("genre_id")?)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let client = self.client().await?;
        let rows = self.bounded(client.query(queries::LIST_USERS, &[])).await?;
        Ok(rows.iter().map(user_from_row).collect::<Result<_, _>>()?)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let client = self.client().await?;
        let row = self.bounded(client.query_opt(queries::GET_USER, &[&id])).await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn reviews_by_user(&self, user_id: i32) -> Result<Vec<Review>, AppError> {
        self.reviews(queries::REVIEWS_BY_USER, user_id).await
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        let client = self.client().await?;
        let rows = self.bounded(client.query(queries::LIST_REVIEWS, &[])).await?;
        Ok(rows.iter().map(review_from_row).collect::<Result<_, _>>()?)
    }

    async fn reviews_by_movie(&self, movie_id: i32) -> Result<Vec<Review>, AppError> {
        self.reviews(queries::REVIEWS_BY_MOVIE, movie_id).await
    }

    async fn create_review(&self, review: &NewReview) -> Result<i32, AppError> {
        let client = self.client().await?;
        let row = self
            .bounded(client.query_one(
                queries::INSERT_REVIEW,
                &[
                    &review.movie_id,
                    &review.user_id,
                    &review.rating,
                    &review.review_text,
                ],
            ))
            .await?;
        Ok(row.try_get("review_id")?)
    }
}
