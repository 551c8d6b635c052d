//! Book endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use bookshelf_core::model::{Book, BookChanges, NewBook, PaginationParams};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidQuery, ValidUuid};
use crate::http::server::AppState;

/// Header carrying the total row count on paginated listings
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Create/update request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub publication_year: i32,
}

impl From<BookRequest> for NewBook {
    fn from(r: BookRequest) -> Self {
        Self {
            title: r.title,
            price: r.price,
            publication_year: r.publication_year,
        }
    }
}

impl From<BookRequest> for BookChanges {
    fn from(r: BookRequest) -> Self {
        Self {
            title: r.title,
            price: r.price,
            publication_year: r.publication_year,
        }
    }
}

/// Book response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub publication_year: i32,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            price: b.price,
            publication_year: b.publication_year,
        }
    }
}

/// Body of create/update responses
#[derive(Debug, Serialize)]
pub struct EntityResponse {
    pub id: Uuid,
}

/// GET /books - all books, or one page with `?page=&per_page=`
async fn list_books(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<PaginationParams>,
) -> Result<(HeaderMap, Json<Vec<BookResponse>>), ApiError> {
    let page = params.into_pagination();
    let books = state.books.get_all(page).await?;

    let mut headers = HeaderMap::new();
    if page.is_some() {
        let total = state.books.count().await?;
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
    }

    Ok((
        headers,
        Json(books.into_iter().map(BookResponse::from).collect()),
    ))
}

/// GET /books/{idOrTitle} - by id when the key is a UUID, by title otherwise
async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state
        .books
        .get_by_id_or_title(&key)
        .await?
        .ok_or_else(|| ApiError::book_not_found(&key))?;

    Ok(Json(BookResponse::from(book)))
}

/// POST /books - create a new book
async fn create_book(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<BookRequest>,
) -> Result<(StatusCode, Json<EntityResponse>), ApiError> {
    let book = state.books.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(EntityResponse { id: book.id })))
}

/// PUT /books/{id} - replace title, price and year
async fn update_book(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    ValidJson(req): ValidJson<BookRequest>,
) -> Result<Json<EntityResponse>, ApiError> {
    let book = state.books.update(id, req.into()).await?;
    Ok(Json(EntityResponse { id: book.id }))
}

/// DELETE /books/{id}
async fn delete_book(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    if state.books.delete(id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::book_not_found(id))
    }
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{key}",
            get(get_book).put(update_book).delete(delete_book),
        )
}
