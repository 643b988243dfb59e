//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input to the tree and grouping logic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid type descriptor: {0:?}")]
    InvalidDescriptor(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
