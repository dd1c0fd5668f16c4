//! Error model for strategy construction and field access.

use thiserror::Error;

/// Result type used across the crate.
pub type EqualityResult<T> = Result<T, EqualityError>;

/// Equality/hashing failure.
///
/// Every operation is pure and deterministic, so a failure observed once will
/// recur identically; callers should propagate rather than retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EqualityError {
    /// An argument was rejected (e.g. a missing strategy target).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A field captured by a field-based strategy could not be read.
    #[error("field `{field}` could not be read")]
    FieldAccess { field: String },
}

impl EqualityError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn field_access(field: impl Into<String>) -> Self {
        Self::FieldAccess {
            field: field.into(),
        }
    }

    /// Error raised when a strategy is built without a target.
    pub fn null_target() -> Self {
        Self::invalid_argument("null")
    }
}
