//! Domain Layer - Entity contract and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Anything the repositories can store
pub trait Entity: Sized + Send + Sync + Clone + 'static {
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Display + Send + Sync + 'static;

    /// Name used in `NotFound` errors
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Serialized as-is to the frontend, which uses the variant to decide
/// between a transient warning and a stored error.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: String, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A day can hold at most {capacity} items")]
    DayFull { day_id: String, capacity: usize },

    #[error("Each day must have at least one itinerary card.")]
    LastItem { day_id: String },

    #[error("Trips are still loading")]
    NotReady,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity: entity.to_string(),
            id: id.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::InvalidInput(message.into())
    }

    /// Validation failures rejected before any mutation
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidInput(_) | DomainError::DayFull { .. } | DomainError::LastItem { .. }
        )
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}
