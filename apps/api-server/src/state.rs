//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::ports::{CommentRepository, PostRepository};
use postboard_infra::{DatabaseConfig, DatabaseConnections, StorageBackend, StorageError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub storage: StorageBackend,
    pub db: DatabaseConnections,
}

impl AppState {
    /// Connect to the database, create the schema if needed and build the
    /// repositories of the chosen strategy.
    pub async fn init(
        config: &DatabaseConfig,
        storage: StorageBackend,
    ) -> Result<Self, StorageError> {
        let db = DatabaseConnections::init(config).await?;
        db.create_schema(storage).await?;

        let repos = db.repositories(storage);
        tracing::info!(storage = %storage, "Application state initialized");

        Ok(Self {
            posts: repos.posts,
            comments: repos.comments,
            storage,
            db,
        })
    }

    /// Release the database pool.
    pub async fn shutdown(self) -> Result<(), StorageError> {
        self.db.close().await
    }
}
