//! Borrowing CRUD handlers
//!
//! Handlers only wire extractors to the data access layer. Id-based handlers
//! take `BorrowingById` before any session; the lookup releases its connection
//! first. Handlers with a body lease their session after `ValidatedJson` has
//! read it.

use axum::{extract::State, http::StatusCode, Json};

use crate::borrowing::{
    crud, Borrowing, BorrowingById, BorrowingChanges, BorrowingCreate, BorrowingUpdate,
    BorrowingUpdatePartial,
};
use crate::db::{Database, DbSession};
use crate::error::ApiResult;
use crate::middleware::ValidatedJson;

/// List every borrowing
pub async fn list_borrowings(mut session: DbSession) -> ApiResult<Json<Vec<Borrowing>>> {
    let borrowings = crud::get_all_borrowings(&mut session).await?;
    Ok(Json(borrowings))
}

/// Create a borrowing
pub async fn create_borrowing(
    State(database): State<Database>,
    ValidatedJson(borrowing_create): ValidatedJson<BorrowingCreate>,
) -> ApiResult<(StatusCode, Json<Borrowing>)> {
    let mut session = database.session().await?;
    let borrowing = crud::create_borrowing(&mut session, borrowing_create).await?;
    Ok((StatusCode::CREATED, Json(borrowing)))
}

/// Get a borrowing by ID
pub async fn get_borrowing(BorrowingById(borrowing): BorrowingById) -> Json<Borrowing> {
    Json(borrowing)
}

/// Replace every mutable field of a borrowing
pub async fn update_borrowing(
    BorrowingById(borrowing): BorrowingById,
    State(database): State<Database>,
    ValidatedJson(borrowing_update): ValidatedJson<BorrowingUpdate>,
) -> ApiResult<Json<Borrowing>> {
    let mut session = database.session().await?;
    let updated = crud::update_borrowing(
        &mut session,
        borrowing,
        BorrowingChanges::Full(borrowing_update),
    )
    .await?;
    Ok(Json(updated))
}

/// Update only the supplied fields of a borrowing
pub async fn update_borrowing_partial(
    BorrowingById(borrowing): BorrowingById,
    State(database): State<Database>,
    ValidatedJson(borrowing_update): ValidatedJson<BorrowingUpdatePartial>,
) -> ApiResult<Json<Borrowing>> {
    let mut session = database.session().await?;
    let updated = crud::update_borrowing(
        &mut session,
        borrowing,
        BorrowingChanges::Partial(borrowing_update),
    )
    .await?;
    Ok(Json(updated))
}

/// Delete a borrowing
pub async fn delete_borrowing(
    BorrowingById(borrowing): BorrowingById,
    mut session: DbSession,
) -> ApiResult<StatusCode> {
    crud::delete_borrowing(&mut session, borrowing).await?;
    Ok(StatusCode::NO_CONTENT)
}
