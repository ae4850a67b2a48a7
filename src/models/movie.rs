//! Movie models and DTOs

use super::{first_validation_message, lenient};
use crate::error::{validation_error, ApiResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Row of the `movies` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub movie_id: i32,
    pub title: String,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub plot_summary: Option<String>,
    pub rating: Option<f64>,
}

/// Movie row with its genre names joined into one comma-separated field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieWithGenres {
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: Option<String>,
}

/// Body of `POST /api/movies` and `PUT /api/movies/{id}`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MoviePayload {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub release_year: Option<i32>,

    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub duration_minutes: Option<i32>,

    #[serde(default)]
    pub plot_summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
}

/// Validated movie fields, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub plot_summary: Option<String>,
    pub rating: Option<f64>,
}

impl MoviePayload {
    pub fn into_new_movie(self) -> ApiResult<NewMovie> {
        self.validate()
            .map_err(|e| validation_error(first_validation_message(&e)))?;

        let title = self
            .title
            .ok_or_else(|| validation_error("Title is required"))?;

        Ok(NewMovie {
            title,
            release_year: self.release_year,
            duration_minutes: self.duration_minutes,
            plot_summary: self.plot_summary,
            rating: self.rating,
        })
    }
}

impl NewMovie {
    /// The row this payload produces once the store has assigned an id
    pub fn into_movie(self, movie_id: i32) -> Movie {
        Movie {
            movie_id,
            title: self.title,
            release_year: self.release_year,
            duration_minutes: self.duration_minutes,
            plot_summary: self.plot_summary,
            rating: self.rating,
        }
    }
}

/// `?page=&limit=` on the movie listing
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;

    fn positive(raw: Option<&str>, default: i64) -> i64 {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(default)
    }

    /// `(limit, offset)` with offset = (page - 1) * limit
    pub fn limit_offset(&self) -> (i64, i64) {
        let page = Self::positive(self.page.as_deref(), Self::DEFAULT_PAGE);
        let limit = Self::positive(self.limit.as_deref(), Self::DEFAULT_LIMIT);
        (limit, (page - 1).saturating_mul(limit))
    }
}

/// `?title=` on the movie search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use pretty_assertions::assert_eq;

    fn page(page: Option<&str>, limit: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(page(None, None).limit_offset(), (10, 0));
        assert_eq!(page(Some("2"), Some("5")).limit_offset(), (5, 5));
        assert_eq!(page(Some("3"), None).limit_offset(), (10, 20));
    }

    #[test]
    fn test_limit_offset_falls_back_on_bad_input() {
        assert_eq!(page(Some("0"), Some("-4")).limit_offset(), (10, 0));
        assert_eq!(page(Some("two"), Some("")).limit_offset(), (10, 0));
    }

    #[test]
    fn test_missing_or_empty_title_is_rejected() {
        for body in [r#"{}"#, r#"{"title": null}"#, r#"{"title": ""}"#] {
            let payload: MoviePayload = serde_json::from_str(body).unwrap();
            match payload.into_new_movie() {
                Err(AppError::Validation(msg)) => assert_eq!(msg, "Title is required"),
                other => panic!("expected validation error for {body}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_valid_payload_converts() {
        let payload: MoviePayload = serde_json::from_str(
            r#"{"title": "Heat", "release_year": 1995, "duration_minutes": "170", "rating": 8.3}"#,
        )
        .unwrap();
        let movie = payload.into_new_movie().unwrap();

        assert_eq!(movie.title, "Heat");
        assert_eq!(movie.release_year, Some(1995));
        assert_eq!(movie.duration_minutes, Some(170));
        assert_eq!(movie.plot_summary, None);
        assert_eq!(movie.rating, Some(8.3));
    }

    #[test]
    fn test_genres_flatten_into_movie() {
        let row = MovieWithGenres {
            movie: NewMovie {
                title: "Alien".into(),
                release_year: Some(1979),
                duration_minutes: None,
                plot_summary: None,
                rating: None,
            }
            .into_movie(3),
            genres: Some("Horror,Sci-Fi".into()),
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["movie_id"], 3);
        assert_eq!(value["title"], "Alien");
        assert_eq!(value["genres"], "Horror,Sci-Fi");
    }
}
