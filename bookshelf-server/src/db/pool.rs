//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a SQLite connection pool, creating the database file if missing.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://bookshelf.db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with custom options.
///
/// In-memory urls are forced down to a single connection, since every
/// connection to `sqlite::memory:` opens its own empty database.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let max_connections = if is_memory_url(database_url) {
        1
    } else {
        max_connections
    };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        // an in-memory database dies with its last connection
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await
}

/// Single-connection pool over a private in-memory database.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options("sqlite::memory:", 1).await
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
