//! Data access tests for borrowings against an in-memory database

use chrono::NaiveDate;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Sqlite;

use borrowings_service::borrowing::{
    crud, BorrowingChanges, BorrowingCreate, BorrowingUpdate, BorrowingUpdatePartial, CrudError,
};
use borrowings_service::db;

/// Helper to create a migrated in-memory connection
async fn setup_test_db() -> PoolConnection<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool.acquire().await.expect("Failed to acquire connection")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_test_request(book_id: i64, reader_id: i64) -> BorrowingCreate {
    BorrowingCreate {
        book_id,
        reader_id,
        borrow_date: Some(date(2024, 3, 1)),
        due_date: Some(date(2024, 3, 15)),
        returned: false,
    }
}

#[tokio::test]
async fn test_create_then_get() {
    let mut conn = setup_test_db().await;

    let created = crud::create_borrowing(&mut conn, create_test_request(1, 2))
        .await
        .expect("create");
    assert!(created.id > 0);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = crud::get_borrowing(&mut conn, created.id)
        .await
        .expect("get")
        .expect("borrowing exists");
    assert_eq!(fetched, created);

    let missing = crud::get_borrowing(&mut conn, created.id + 1)
        .await
        .expect("get");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_get_all_is_ordered_by_id() {
    let mut conn = setup_test_db().await;
    assert!(crud::get_all_borrowings(&mut conn).await.unwrap().is_empty());

    for book_id in [3, 1, 2] {
        crud::create_borrowing(&mut conn, create_test_request(book_id, 9))
            .await
            .unwrap();
    }

    let all = crud::get_all_borrowings(&mut conn).await.unwrap();
    let book_ids: Vec<i64> = all.iter().map(|b| b.book_id).collect();
    assert_eq!(book_ids, vec![3, 1, 2]);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_partial_update_persists_only_supplied_fields() {
    let mut conn = setup_test_db().await;
    let created = crud::create_borrowing(&mut conn, create_test_request(1, 2))
        .await
        .unwrap();

    let updated = crud::update_borrowing(
        &mut conn,
        created.clone(),
        BorrowingChanges::Partial(BorrowingUpdatePartial {
            returned: Some(true),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    assert!(updated.returned);
    assert_eq!(updated.book_id, created.book_id);
    assert_eq!(updated.reader_id, created.reader_id);
    assert_eq!(updated.borrow_date, created.borrow_date);
    assert_eq!(updated.due_date, created.due_date);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let stored = crud::get_borrowing(&mut conn, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_full_update_replaces_fields() {
    let mut conn = setup_test_db().await;
    let created = crud::create_borrowing(&mut conn, create_test_request(1, 2))
        .await
        .unwrap();

    let updated = crud::update_borrowing(
        &mut conn,
        created.clone(),
        BorrowingChanges::Full(BorrowingUpdate {
            book_id: 4,
            reader_id: 5,
            borrow_date: date(2024, 5, 1),
            due_date: date(2024, 5, 2),
            returned: true,
        }),
    )
    .await
    .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.book_id, 4);
    assert_eq!(updated.reader_id, 5);
    assert_eq!(updated.borrow_date, date(2024, 5, 1));
    assert_eq!(updated.due_date, date(2024, 5, 2));
    assert!(updated.returned);
}

#[tokio::test]
async fn test_update_rejects_inverted_period() {
    let mut conn = setup_test_db().await;
    let created = crud::create_borrowing(&mut conn, create_test_request(1, 2))
        .await
        .unwrap();

    let result = crud::update_borrowing(
        &mut conn,
        created.clone(),
        BorrowingChanges::Partial(BorrowingUpdatePartial {
            borrow_date: Some(date(2024, 4, 1)),
            ..Default::default()
        }),
    )
    .await;

    assert!(matches!(result, Err(CrudError::InvalidPeriod { .. })));

    let stored = crud::get_borrowing(&mut conn, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_delete_removes_record() {
    let mut conn = setup_test_db().await;
    let keep = crud::create_borrowing(&mut conn, create_test_request(1, 2))
        .await
        .unwrap();
    let doomed = crud::create_borrowing(&mut conn, create_test_request(3, 4))
        .await
        .unwrap();

    crud::delete_borrowing(&mut conn, doomed.clone())
        .await
        .unwrap();

    assert!(crud::get_borrowing(&mut conn, doomed.id)
        .await
        .unwrap()
        .is_none());
    let remaining = crud::get_all_borrowings(&mut conn).await.unwrap();
    assert_eq!(remaining, vec![keep]);
}
