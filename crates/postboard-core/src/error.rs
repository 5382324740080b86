//! Domain-level error types.

use thiserror::Error;

/// Domain errors - request preconditions that failed.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The entity addressed by id does not exist.
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: &'static str, id: i32 },

    /// A new entity references another one that does not exist.
    #[error("{entity_type} {id} does not exist")]
    MissingReference { entity_type: &'static str, id: i32 },
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
