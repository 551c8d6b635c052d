//! Storage contract for books
//!
//! One logical table keyed by `id`; `title` is a secondary, non-unique
//! lookup key. Implementations propagate store failures unmodified and never
//! retry.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RepoError;
use crate::model::{Book, Pagination};

pub use memory::InMemoryBookRepository;

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Books ordered by id. `None` returns the whole set.
    async fn list(&self, page: Option<Pagination>) -> Result<Vec<Book>, RepoError>;

    /// Total number of stored books
    async fn count(&self) -> Result<u64, RepoError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Book>, RepoError>;

    /// First exact title match in insertion order
    async fn get_by_title(&self, title: &str) -> Result<Option<Book>, RepoError>;

    /// Insert `book` (id already set by the caller) and return it
    async fn create(&self, book: Book) -> Result<Book, RepoError>;

    /// Overwrite the row for `book.id`. `RepoError::NotFound` if it is gone.
    async fn update(&self, book: &Book) -> Result<(), RepoError>;

    /// Delete the row for `id`, reporting whether one was removed
    async fn remove(&self, id: Uuid) -> Result<bool, RepoError>;
}
