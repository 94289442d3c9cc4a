//! Borrowing models and request representations

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Loan period applied when a borrowing is created without a due date
pub const DEFAULT_LOAN_PERIOD_DAYS: u64 = 14;

/// Borrowing model: a reader's loan of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Borrowing {
    pub id: i64,
    pub book_id: i64,
    pub reader_id: i64,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new borrowing
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_period"))]
pub struct BorrowingCreate {
    #[validate(range(min = 1, message = "must be a positive identifier"))]
    pub book_id: i64,
    #[validate(range(min = 1, message = "must be a positive identifier"))]
    pub reader_id: i64,
    #[serde(default)]
    pub borrow_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub returned: bool,
}

/// Full replacement of a borrowing's mutable fields
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_update_period"))]
pub struct BorrowingUpdate {
    #[validate(range(min = 1, message = "must be a positive identifier"))]
    pub book_id: i64,
    #[validate(range(min = 1, message = "must be a positive identifier"))]
    pub reader_id: i64,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned: bool,
}

/// Partial update; absent fields keep their stored values
///
/// An explicit `null` is rejected: none of these columns is nullable, so it
/// can neither clear a value nor stand in for "unchanged".
///
/// The period check here only sees a pair supplied together; a period that
/// mixes stored and supplied dates is checked by `crud::update_borrowing`
/// after the merge.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_partial_period"))]
pub struct BorrowingUpdatePartial {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(range(min = 1, message = "must be a positive identifier"))]
    pub book_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(range(min = 1, message = "must be a positive identifier"))]
    pub reader_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub borrow_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null")]
    pub returned: Option<bool>,
}

/// Deserialize a present field as `Some`, failing on `null`.
///
/// Absent fields never reach this function; `#[serde(default)]` leaves them
/// `None`.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Changes applied by an update
#[derive(Debug, Clone)]
pub enum BorrowingChanges {
    Full(BorrowingUpdate),
    Partial(BorrowingUpdatePartial),
}

impl Borrowing {
    /// Merge `changes` into this borrowing.
    ///
    /// `id` and the timestamps are left untouched; the store refreshes
    /// `updated_at` when it persists the result.
    pub fn apply(mut self, changes: BorrowingChanges) -> Borrowing {
        match changes {
            BorrowingChanges::Full(update) => {
                self.book_id = update.book_id;
                self.reader_id = update.reader_id;
                self.borrow_date = update.borrow_date;
                self.due_date = update.due_date;
                self.returned = update.returned;
            }
            BorrowingChanges::Partial(update) => {
                if let Some(book_id) = update.book_id {
                    self.book_id = book_id;
                }
                if let Some(reader_id) = update.reader_id {
                    self.reader_id = reader_id;
                }
                if let Some(borrow_date) = update.borrow_date {
                    self.borrow_date = borrow_date;
                }
                if let Some(due_date) = update.due_date {
                    self.due_date = due_date;
                }
                if let Some(returned) = update.returned {
                    self.returned = returned;
                }
            }
        }
        self
    }

    pub fn has_valid_period(&self) -> bool {
        self.due_date >= self.borrow_date
    }
}

impl BorrowingCreate {
    /// Borrow and due dates, falling back to `today` and the default loan period
    pub fn resolve_dates(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let borrow_date = self.borrow_date.unwrap_or(today);
        let due_date = self.due_date.unwrap_or_else(|| {
            borrow_date
                .checked_add_days(Days::new(DEFAULT_LOAN_PERIOD_DAYS))
                .unwrap_or(NaiveDate::MAX)
        });
        (borrow_date, due_date)
    }
}

fn period_error() -> ValidationError {
    let mut error = ValidationError::new("period");
    error.message = Some(Cow::from("due_date must not precede borrow_date"));
    error
}

fn check_period(borrow_date: NaiveDate, due_date: NaiveDate) -> Result<(), ValidationError> {
    if due_date < borrow_date {
        return Err(period_error());
    }
    Ok(())
}

fn validate_create_period(create: &BorrowingCreate) -> Result<(), ValidationError> {
    match (create.borrow_date, create.due_date) {
        (Some(borrow_date), Some(due_date)) => check_period(borrow_date, due_date),
        _ => Ok(()),
    }
}

fn validate_update_period(update: &BorrowingUpdate) -> Result<(), ValidationError> {
    check_period(update.borrow_date, update.due_date)
}

fn validate_partial_period(update: &BorrowingUpdatePartial) -> Result<(), ValidationError> {
    match (update.borrow_date, update.due_date) {
        (Some(borrow_date), Some(due_date)) => check_period(borrow_date, due_date),
        _ => Ok(()),
    }
}
