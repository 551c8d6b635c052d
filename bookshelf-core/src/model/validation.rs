//! Book invariants
//!
//! Every rule is evaluated independently so a caller sees all offending
//! fields at once, not just the first.

use std::fmt;

use chrono::{Datelike, Utc};

use super::Book;

/// A single broken invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Id is the nil UUID
    NilId,

    /// Title is empty or whitespace only
    EmptyTitle,

    /// Publication year lies after the current year
    FutureYear { year: i32, max: i32 },
}

impl Violation {
    /// Name of the offending field, as it appears on the wire
    pub fn field(&self) -> &'static str {
        match self {
            Self::NilId => "id",
            Self::EmptyTitle => "title",
            Self::FutureYear { .. } => "publicationYear",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NilId => write!(f, "id cannot be empty"),
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::FutureYear { year, max } => {
                write!(f, "publicationYear {} is after {}", year, max)
            }
        }
    }
}

/// Book failed one or more invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid book: {}", summary(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check `book` against the current UTC calendar year.
pub fn validate(book: &Book) -> Vec<Violation> {
    validate_for_year(book, Utc::now().year())
}

/// Check `book` with an explicit notion of "this year".
pub fn validate_for_year(book: &Book, current_year: i32) -> Vec<Violation> {
    let mut violations = Vec::new();

    if book.id.is_nil() {
        violations.push(Violation::NilId);
    }

    if book.title.trim().is_empty() {
        violations.push(Violation::EmptyTitle);
    }

    if book.publication_year > current_year {
        violations.push(Violation::FutureYear {
            year: book.publication_year,
            max: current_year,
        });
    }

    violations
}

/// `Ok(())` if `book` has no violations.
pub fn ensure_valid(book: &Book) -> Result<(), ValidationError> {
    let violations = validate(book);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
