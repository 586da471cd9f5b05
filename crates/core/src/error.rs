use std::time::Duration;

use crate::types::DbId;

/// Failure reported by a [`QaStore`](crate::store::QaStore) implementation.
///
/// Store errors are never retried or swallowed by the core; they bubble up
/// unchanged to the request layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A foreign-key or check constraint rejected the write.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A row came back that does not fit the typed record it maps to.
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    /// The store call did not complete within its deadline.
    #[error("Store call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Any other backend failure (connection loss, bad query, ...).
    #[error("Store backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Shorthand for a missing question.
    pub fn question_not_found(qid: DbId) -> Self {
        CoreError::NotFound {
            entity: "Question",
            id: qid.to_string(),
        }
    }
}
