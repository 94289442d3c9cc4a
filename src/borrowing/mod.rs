//! Borrowing domain: models, data access and request dependencies

pub mod crud;
pub mod dependencies;
pub mod model;

pub use crud::CrudError;
pub use dependencies::BorrowingById;
pub use model::{
    Borrowing, BorrowingChanges, BorrowingCreate, BorrowingUpdate, BorrowingUpdatePartial,
};
