//! Database connection management and repositories.

mod connections;
pub mod entity;
mod orm_base;
pub mod orm_repo;
pub mod query;
pub mod schema;

pub use connections::{
    DatabaseConfig, DatabaseConnections, Repositories, StorageBackend, StorageError,
};
pub use orm_repo::{OrmCommentRepository, OrmPostRepository};
pub use query::{QueryCommentRepository, QueryPostRepository};

use postboard_core::RepoError;
use sea_orm::{DbErr, SqlErr};

/// Classify a SeaORM error for the repository boundary.
pub(crate) fn repo_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(msg))
        | Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[cfg(test)]
mod tests;
