//! Database layer - connection pool, schema and repository
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - Schema created on startup with CREATE TABLE IF NOT EXISTS
//! - Single-statement writes, no transactions spanning books

pub mod books;
pub mod migrations;
pub mod pool;

pub use books::SqliteBookRepository;
pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
