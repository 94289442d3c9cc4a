//! Request-scoped borrowing lookup

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};

use super::crud;
use super::model::Borrowing;
use crate::db::{Database, DbSession};
use crate::error::ApiError;

/// The borrowing named by the `borrowing_id` path segment
///
/// Rejects with 422 when the id is not an integer and 404 when no such
/// borrowing exists. The lookup leases its own session and returns it to the
/// pool before the handler runs, so place this extractor ahead of the
/// handler's own session.
#[derive(Debug, Clone)]
pub struct BorrowingById(pub Borrowing);

#[async_trait]
impl<S> FromRequestParts<S> for BorrowingById
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(borrowing_id) = Path::<i64>::from_request_parts(parts, state).await?;

        let mut session = DbSession::from_request_parts(parts, state).await?;
        crud::get_borrowing(&mut session, borrowing_id)
            .await?
            .map(BorrowingById)
            .ok_or_else(|| ApiError::NotFound(format!("Borrowing {} not found", borrowing_id)))
    }
}
