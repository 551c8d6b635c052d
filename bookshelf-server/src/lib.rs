//! bookshelf-server: HTTP API for books
//!
//! - `db` - SQLite pool, schema and the sqlx-backed `BookRepository`
//! - `http` - axum router, JSON errors and graceful shutdown

pub mod db;
pub mod http;

pub use db::{create_pool, SqliteBookRepository};
pub use http::{build_router, run_server, AppState, ServerConfig};
