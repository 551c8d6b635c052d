//! The `Book` entity

use rust_decimal::Decimal;
use uuid::Uuid;

/// A titled, priced, dated publication record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub price: Decimal,
    pub publication_year: i32,
}

/// Fields supplied by a create request; the id is generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub price: Decimal,
    pub publication_year: i32,
}

/// Fields replaced by an update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub price: Decimal,
    pub publication_year: i32,
}

impl Book {
    /// Build a book with a freshly generated v4 id.
    pub fn create(new: NewBook) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            price: new.price,
            publication_year: new.publication_year,
        }
    }

    /// Overwrite the mutable fields in place. The id never changes.
    pub fn apply(&mut self, changes: BookChanges) {
        self.title = changes.title;
        self.price = changes.price;
        self.publication_year = changes.publication_year;
    }
}
