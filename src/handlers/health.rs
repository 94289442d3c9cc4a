//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::db::Database;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check(State(database): State<Database>) -> Json<HealthResponse> {
    let (status, db_status) = if database.is_healthy().await {
        ("healthy", "connected")
    } else {
        ("unhealthy", "unreachable")
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: db_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
