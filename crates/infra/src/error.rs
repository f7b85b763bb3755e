use thiserror::Error;

use boardstock_core::DomainError;

pub type YardResult<T> = Result<T, YardError>;

/// Failure of a yard operation. Nothing is mutated when one is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum YardError {
    /// No warehouse carries the given name.
    #[error("unknown warehouse: {0}")]
    UnknownWarehouse(String),

    /// The domain rejected the command (validation, insufficient stock, ...).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl YardError {
    /// `true` for a withdrawal rejected for lack of stock.
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, YardError::Domain(DomainError::InsufficientStock { .. }))
    }
}
