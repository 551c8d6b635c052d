//! Book repository backed by SQLite
//!
//! - list: ORDER BY id, optional LIMIT/OFFSET
//! - get_by_title: first match in rowid (insertion) order
//! - update/remove: report misses through rows_affected, no check-then-write

use std::str::FromStr;

use async_trait::async_trait;
use bookshelf_core::model::{Book, Pagination};
use bookshelf_core::{BookRepository, RepoError};
use rust_decimal::Decimal;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// Row as stored; price is kept as text
#[derive(Debug, FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    price: String,
    publication_year: i32,
}

impl TryFrom<BookRow> for Book {
    type Error = RepoError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(&row.price)
            .map_err(|e| RepoError::corrupt(row.id, format!("price '{}': {}", row.price, e)))?;

        Ok(Book {
            id: row.id,
            title: row.title,
            price,
            publication_year: row.publication_year,
        })
    }
}

fn decode_all(rows: Vec<BookRow>) -> Result<Vec<Book>, RepoError> {
    rows.into_iter().map(Book::try_from).collect()
}

/// sqlx implementation of `BookRepository`
#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn list(&self, page: Option<Pagination>) -> Result<Vec<Book>, RepoError> {
        let rows = match page {
            None => {
                sqlx::query_as::<_, BookRow>(
                    "SELECT id, title, price, publication_year FROM books ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await
            }
            Some(p) => {
                sqlx::query_as::<_, BookRow>(
                    r#"
                    SELECT id, title, price, publication_year
                    FROM books
                    ORDER BY id
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(i64::from(p.limit()))
                .bind(p.offset() as i64)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(RepoError::store)?;

        decode_all(rows)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::store)?;
        Ok(count as u64)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Book>, RepoError> {
        sqlx::query_as::<_, BookRow>(
            "SELECT id, title, price, publication_year FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::store)?
        .map(Book::try_from)
        .transpose()
    }

    async fn get_by_title(&self, title: &str) -> Result<Option<Book>, RepoError> {
        sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, price, publication_year
            FROM books
            WHERE title = ?
            ORDER BY rowid
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::store)?
        .map(Book::try_from)
        .transpose()
    }

    async fn create(&self, book: Book) -> Result<Book, RepoError> {
        sqlx::query(
            "INSERT INTO books (id, title, price, publication_year) VALUES (?, ?, ?, ?)",
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.price.to_string())
        .bind(book.publication_year)
        .execute(&self.pool)
        .await
        .map_err(RepoError::store)?;

        Ok(book)
    }

    async fn update(&self, book: &Book) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE books SET title = ?, price = ?, publication_year = ? WHERE id = ?",
        )
        .bind(&book.title)
        .bind(book.price.to_string())
        .bind(book.publication_year)
        .bind(book.id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::store)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound { id: book.id });
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::store)?;

        Ok(result.rows_affected() > 0)
    }
}
