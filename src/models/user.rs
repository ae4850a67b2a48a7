//! User model

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public projection of a `users` row.
///
/// Credential columns are never selected, so there is nothing here to leak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}
