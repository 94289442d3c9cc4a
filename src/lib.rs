//! Borrowings service library
//!
//! REST endpoints for a library's borrowing records: list, create, fetch,
//! full update, partial update and delete, backed by SQLite.

pub mod borrowing;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::create_router;
pub use state::AppState;
