//! bookshelf-core: the Book domain
//!
//! Holds everything that does not depend on a web framework or a database
//! driver:
//! - `model` - the `Book` entity, validation rules and pagination
//! - `repo` - the storage contract plus an in-memory implementation
//! - `service` - the use cases (list, get, create, update, delete)
//! - `config` - `~/.bookshelf/config.toml` loading

pub mod config;
pub mod error;
pub mod model;
pub mod repo;
pub mod service;

pub use config::BookshelfConfig;
pub use error::{RepoError, ServiceError};
pub use model::{Book, BookChanges, NewBook, Pagination, ValidationError, Violation};
pub use repo::BookRepository;
pub use service::BookService;
