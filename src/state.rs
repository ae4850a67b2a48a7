//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::db::MovieStore;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Relational store; one pooled connection per request
    pub store: Arc<dyn MovieStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
