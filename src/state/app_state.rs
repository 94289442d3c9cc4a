//! Application state shared across handlers

use axum::extract::FromRef;

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.database.clone()
    }
}
