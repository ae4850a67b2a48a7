//! Review models and DTOs

use super::{first_validation_message, lenient};
use crate::error::{validation_error, ApiResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Row of the `reviews` table, optionally carrying joined display columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub review_id: i32,
    pub movie_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub review_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
}

/// Body of `POST /api/reviews`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReviewPayload {
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub movie_id: Option<i32>,

    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub user_id: Option<i32>,

    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub rating: Option<i32>,

    #[serde(default)]
    pub review_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub movie_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub review_text: Option<String>,
}

impl ReviewPayload {
    pub fn into_new_review(self) -> ApiResult<NewReview> {
        // Zero counts as absent, matching the public contract for ids and rating
        let present = |v: Option<i32>| v.filter(|n| *n != 0);

        let (Some(movie_id), Some(user_id), Some(rating)) =
            (present(self.movie_id), present(self.user_id), present(self.rating))
        else {
            return Err(validation_error("Movie ID, user ID, and rating are required"));
        };

        self.validate()
            .map_err(|e| validation_error(first_validation_message(&e)))?;

        Ok(NewReview {
            movie_id,
            user_id,
            rating,
            review_text: self.review_text,
        })
    }
}
