//! Data access for borrowings
//!
//! Every function runs on the caller's connection; no transaction or retry is
//! managed here.

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteConnection;
use thiserror::Error;

use super::model::{Borrowing, BorrowingChanges, BorrowingCreate};

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("due_date {due_date} precedes borrow_date {borrow_date}")]
    InvalidPeriod {
        borrow_date: NaiveDate,
        due_date: NaiveDate,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub async fn get_all_borrowings(conn: &mut SqliteConnection) -> Result<Vec<Borrowing>, CrudError> {
    let borrowings = sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;

    Ok(borrowings)
}

pub async fn get_borrowing(
    conn: &mut SqliteConnection,
    borrowing_id: i64,
) -> Result<Option<Borrowing>, CrudError> {
    let borrowing = sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings WHERE id = ?")
        .bind(borrowing_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(borrowing)
}

pub async fn create_borrowing(
    conn: &mut SqliteConnection,
    borrowing_create: BorrowingCreate,
) -> Result<Borrowing, CrudError> {
    let now = Utc::now();
    let (borrow_date, due_date) = borrowing_create.resolve_dates(now.date_naive());
    if due_date < borrow_date {
        return Err(CrudError::InvalidPeriod {
            borrow_date,
            due_date,
        });
    }

    let borrowing = sqlx::query_as::<_, Borrowing>(
        r#"
        INSERT INTO borrowings (
            book_id, reader_id, borrow_date, due_date,
            returned, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(borrowing_create.book_id)
    .bind(borrowing_create.reader_id)
    .bind(borrow_date)
    .bind(due_date)
    .bind(borrowing_create.returned)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    tracing::info!(
        borrowing_id = borrowing.id,
        book_id = borrowing.book_id,
        reader_id = borrowing.reader_id,
        "Borrowing created"
    );

    Ok(borrowing)
}

/// Merge `changes` into `borrowing` and persist the result.
pub async fn update_borrowing(
    conn: &mut SqliteConnection,
    borrowing: Borrowing,
    changes: BorrowingChanges,
) -> Result<Borrowing, CrudError> {
    let partial = matches!(changes, BorrowingChanges::Partial(_));
    let merged = borrowing.apply(changes);
    if !merged.has_valid_period() {
        return Err(CrudError::InvalidPeriod {
            borrow_date: merged.borrow_date,
            due_date: merged.due_date,
        });
    }

    let updated = sqlx::query_as::<_, Borrowing>(
        r#"
        UPDATE borrowings
        SET book_id = ?, reader_id = ?, borrow_date = ?, due_date = ?,
            returned = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(merged.book_id)
    .bind(merged.reader_id)
    .bind(merged.borrow_date)
    .bind(merged.due_date)
    .bind(merged.returned)
    .bind(Utc::now())
    .bind(merged.id)
    .fetch_one(&mut *conn)
    .await?;

    tracing::info!(borrowing_id = updated.id, partial, "Borrowing updated");

    Ok(updated)
}

pub async fn delete_borrowing(
    conn: &mut SqliteConnection,
    borrowing: Borrowing,
) -> Result<(), CrudError> {
    sqlx::query("DELETE FROM borrowings WHERE id = ?")
        .bind(borrowing.id)
        .execute(&mut *conn)
        .await?;

    tracing::info!(borrowing_id = borrowing.id, "Borrowing deleted");

    Ok(())
}
