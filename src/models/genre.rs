//! Genre models and DTOs

use super::first_validation_message;
use crate::error::{validation_error, ApiResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Row of the `genres` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genre {
    pub genre_id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Body of `POST /api/genres`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GenrePayload {
    #[validate(
        required(message = "Genre name is required"),
        length(min = 1, message = "Genre name is required")
    )]
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGenre {
    pub name: String,
    pub description: Option<String>,
}

impl GenrePayload {
    pub fn into_new_genre(self) -> ApiResult<NewGenre> {
        self.validate()
            .map_err(|e| validation_error(first_validation_message(&e)))?;

        Ok(NewGenre {
            name: self
                .name
                .ok_or_else(|| validation_error("Genre name is required"))?,
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_name_is_required() {
        let payload: GenrePayload = serde_json::from_str(r#"{"description": "Loud"}"#).unwrap();
        assert!(matches!(
            payload.into_new_genre(),
            Err(AppError::Validation(msg)) if msg == "Genre name is required"
        ));
    }

    #[test]
    fn test_description_is_optional() {
        let payload: GenrePayload = serde_json::from_str(r#"{"name": "Noir"}"#).unwrap();
        let genre = payload.into_new_genre().unwrap();
        assert_eq!(genre.name, "Noir");
        assert_eq!(genre.description, None);
    }
}
