//! In-memory repository
//!
//! A `Vec` behind a tokio `RwLock`, so insertion order doubles as the title
//! lookup order. Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BookRepository;
use crate::error::RepoError;
use crate::model::{Book, Pagination};

#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self, page: Option<Pagination>) -> Result<Vec<Book>, RepoError> {
        let mut books = self.books.read().await.clone();
        books.sort_by_key(|b| b.id);

        Ok(match page {
            None => books,
            Some(p) => books
                .into_iter()
                .skip(p.offset() as usize)
                .take(p.limit() as usize)
                .collect(),
        })
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.books.read().await.len() as u64)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Book>, RepoError> {
        Ok(self.books.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn get_by_title(&self, title: &str) -> Result<Option<Book>, RepoError> {
        Ok(self
            .books
            .read()
            .await
            .iter()
            .find(|b| b.title == title)
            .cloned())
    }

    async fn create(&self, book: Book) -> Result<Book, RepoError> {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.id == book.id) {
            return Err(RepoError::store(format!("duplicate id '{}'", book.id)));
        }
        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, book: &Book) -> Result<(), RepoError> {
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|b| b.id == book.id)
            .ok_or(RepoError::NotFound { id: book.id })?;
        *slot = book.clone();
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }
}
