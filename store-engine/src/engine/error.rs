//! Engine error taxonomy
//!
//! All errors are reported synchronously to the caller; nothing is
//! retried and no partial state change survives a failure.

use crate::storage::StorageError;
use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Referenced order id does not exist
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Transition attempted from a state that does not permit it
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Quote inputs out of domain
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Malformed creation request
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// The supplied version is stale - the entity changed since it was read
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Acting identity is not allowed to run this operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type EngineResult<T> = Result<T, EngineError>;
