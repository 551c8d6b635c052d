//! Book use cases
//!
//! Each method is a short sequence of store round trips:
//! - reads: 1 round trip
//! - create: validate, then 1 write
//! - update: 1 read, validate, 1 write
//! - delete: 1 write
//!
//! Dropping the returned future cancels the pending round trip.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{ensure_valid, Book, BookChanges, NewBook, Pagination};
use crate::repo::BookRepository;

/// Orchestrates validation and persistence for books
#[derive(Clone)]
pub struct BookService {
    repo: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }

    /// List books, optionally one page at a time.
    pub async fn get_all(&self, page: Option<Pagination>) -> ServiceResult<Vec<Book>> {
        debug!(?page, "listing books");
        Ok(self.repo.list(page).await?)
    }

    /// Total number of stored books.
    pub async fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count().await?)
    }

    /// Look a book up by id when `key` parses as a UUID, by exact title otherwise.
    pub async fn get_by_id_or_title(&self, key: &str) -> ServiceResult<Option<Book>> {
        let book = match Uuid::parse_str(key) {
            Ok(id) => {
                debug!(%id, "fetching book by id");
                self.repo.get_by_id(id).await?
            }
            Err(_) => {
                debug!(title = key, "fetching book by title");
                self.repo.get_by_title(key).await?
            }
        };
        Ok(book)
    }

    /// Create a book with a new id. Nothing is stored if validation fails.
    pub async fn create(&self, new: NewBook) -> ServiceResult<Book> {
        let book = Book::create(new);
        ensure_valid(&book)?;

        let created = self.repo.create(book).await?;
        info!(id = %created.id, title = %created.title, "book created");
        Ok(created)
    }

    /// Replace the fields of an existing book.
    pub async fn update(&self, id: Uuid, changes: BookChanges) -> ServiceResult<Book> {
        let mut book = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        book.apply(changes);
        ensure_valid(&book)?;

        // Last write wins against concurrent updates; a concurrent delete
        // surfaces as NotFound.
        self.repo.update(&book).await?;
        info!(%id, "book updated");
        Ok(book)
    }

    /// Delete a book. `false` when nothing was there to delete.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<bool> {
        let removed = self.repo.remove(id).await?;
        if removed {
            info!(%id, "book deleted");
        } else {
            debug!(%id, "delete matched no book");
        }
        Ok(removed)
    }
}
