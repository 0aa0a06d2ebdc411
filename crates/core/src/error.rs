//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic, locally recoverable failures belong here. A failed
/// operation leaves the inventory and its history untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The caller supplied an invalid value (negative quantity, empty name,
    /// unknown category, removing more than is on hand).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced item is no longer present.
    #[error("not found")]
    NotFound,

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// True for the "referenced id is gone" case, which callers treat as a no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
