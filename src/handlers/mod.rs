//! API handlers for the borrowings service

pub mod borrowing;
pub mod health;

pub use borrowing::*;
pub use health::health_check;
