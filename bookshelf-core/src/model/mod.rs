//! Domain models
//!
//! `Book` is a plain data holder; its invariants are checked by
//! `validation` before anything is persisted.

pub mod book;
pub mod pagination;
pub mod validation;

pub use book::{Book, BookChanges, NewBook};
pub use pagination::{Pagination, PaginationParams};
pub use validation::{ensure_valid, validate, validate_for_year, ValidationError, Violation};
