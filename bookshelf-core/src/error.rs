//! Structured error types for the repository and service layers.
//!
//! Library consumers match on these; the HTTP layer maps them to status codes
//! and the CLI wraps them with `anyhow`.

use thiserror::Error;
use uuid::Uuid;

use crate::model::ValidationError;

/// Boxed driver error, so the contract does not name a database crate
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by a `BookRepository`
#[derive(Error, Debug)]
pub enum RepoError {
    /// No row matched the id of a write
    #[error("book '{id}' not found")]
    NotFound { id: Uuid },

    /// Stored row could not be turned back into a `Book`
    #[error("book '{id}' is corrupt: {reason}")]
    Corrupt { id: Uuid, reason: String },

    /// Failure reported by the backing store (connectivity, constraint, ...)
    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

impl RepoError {
    /// Wrap any driver error
    pub fn store(source: impl Into<StoreError>) -> Self {
        Self::Store(source.into())
    }

    /// Create a corrupt-row error
    pub fn corrupt(id: Uuid, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            id,
            reason: reason.into(),
        }
    }
}

/// Errors raised by `BookService` use cases
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("book '{0}' not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Repository(RepoError),
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { id } => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
