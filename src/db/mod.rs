//! Database connection and pool management for the borrowings service
//!
//! This module handles SQLite connection pooling, migrations and the
//! per-request session extractor.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;
use crate::error::ApiError;

/// Database connection error
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to run migrations: {0}")]
    MigrationError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Create a database connection pool
///
/// In-memory databases vanish with their last connection, so they get a single
/// connection that is never reaped.
pub async fn create_pool(config: &Config) -> Result<SqlitePool, DbError> {
    tracing::info!("Connecting to database at {}", config.database_url_masked());

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| DbError::ConnectionError(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if config.is_in_memory_database() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .idle_timeout(Duration::from_secs(600))
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    tracing::info!("Database migrations completed successfully");

    Ok(())
}

/// Check database connectivity (for health checks)
pub async fn check_health(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    Ok(())
}

/// Database pool wrapper for use in application state
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lease a connection for the rest of the request
    ///
    /// Handlers that read a body call this once the body is parsed, so a slow
    /// client never holds a connection while it uploads.
    pub async fn session(&self) -> Result<DbSession, sqlx::Error> {
        self.pool.acquire().await.map(DbSession)
    }

    /// Check database health
    pub async fn is_healthy(&self) -> bool {
        check_health(&self.pool).await.is_ok()
    }
}

impl Deref for Database {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

/// A pooled connection leased for the duration of one request
///
/// The connection goes back to the pool when the extractor is dropped. It is
/// leased while the request parts are extracted, before any body is read, so
/// only body-less handlers take it as an extractor; the others call
/// [`Database::session`] after their body has been parsed.
///
/// ```rust,ignore
/// async fn handler(mut session: DbSession) -> ApiResult<Json<Vec<Borrowing>>> {
///     Ok(Json(crud::get_all_borrowings(&mut session).await?))
/// }
/// ```
pub struct DbSession(pub PoolConnection<Sqlite>);

#[async_trait]
impl<S> FromRequestParts<S> for DbSession
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Database::from_ref(state).session().await?;
        Ok(session)
    }
}

impl Deref for DbSession {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
