//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant describes a user-recoverable input problem; none of them
/// leaves partially applied state behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-positive dimension, empty name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A withdrawal asked for more volume than the warehouse holds.
    #[error("insufficient stock: requested {requested:.3} 方, available {available:.3} 方")]
    InsufficientStock { requested: f64, available: f64 },

    /// A requested resource was not found (domain-level).
    #[error("not found: {0}")]
    NotFound(String),

    /// A conflict occurred (e.g. duplicate warehouse name).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn insufficient(requested: f64, available: f64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_uses_three_decimals() {
        let err = DomainError::insufficient(1.5, 0.161);
        assert_eq!(
            err.to_string(),
            "insufficient stock: requested 1.500 方, available 0.161 方"
        );
    }
}
