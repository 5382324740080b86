use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, Schema};

use postboard_core::ports::{CommentRepository, PostRepository};

use super::entity::{comment, post};
use super::orm_repo::{OrmCommentRepository, OrmPostRepository};
use super::query::{QueryCommentRepository, QueryPostRepository};
use super::schema;

/// Configuration for the database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
        }
    }

    /// Every pooled connection to an in-memory SQLite URL would open its own
    /// empty database.
    fn is_in_memory(&self) -> bool {
        self.url.starts_with("sqlite:")
            && (self.url.contains(":memory:") || self.url.contains("mode=memory"))
    }
}

/// Which data-access strategy serves the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// SQL composed with the query builder.
    #[default]
    Query,
    /// SeaORM entities.
    Orm,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Query => "query",
            StorageBackend::Orm => "orm",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(StorageBackend::Query),
            "orm" => Ok(StorageBackend::Orm),
            other => Err(StorageError::UnknownBackend(other.to_string())),
        }
    }
}

/// Storage lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    Connect(#[source] DbErr),

    #[error("Schema creation failed: {0}")]
    Schema(#[source] DbErr),

    #[error("Closing the database failed: {0}")]
    Close(#[source] DbErr),

    #[error("Unknown storage backend `{0}` (expected `query` or `orm`)")]
    UnknownBackend(String),
}

/// The repositories handlers work against, independent of the strategy.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

/// The process-wide database handle.
///
/// Opened once at startup with [`DatabaseConnections::init`] and released
/// with [`DatabaseConnections::close`] after the server stops. Clones share
/// the same pool, so closing any clone closes it for all.
#[derive(Clone)]
pub struct DatabaseConnections {
    pub main: DbConn,
}

impl DatabaseConnections {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, StorageError> {
        tracing::info!("Initializing database connection...");

        let mut opts = ConnectOptions::new(&config.url);
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(true);

        if config.is_in_memory() {
            opts.max_connections(1).min_connections(1);
        } else {
            opts.idle_timeout(Duration::from_secs(300));
        }

        let main = Database::connect(opts)
            .await
            .map_err(StorageError::Connect)?;
        tracing::info!(
            backend = ?main.get_database_backend(),
            "Database connected (pool: {})",
            config.max_connections
        );

        Ok(Self { main })
    }

    /// Create the `posts` and `comments` tables if they are absent, the way
    /// the given strategy defines them.
    pub async fn create_schema(&self, backend: StorageBackend) -> Result<(), StorageError> {
        let db_backend = self.main.get_database_backend();

        let statements = match backend {
            StorageBackend::Query => {
                vec![schema::create_posts_table(), schema::create_comments_table()]
            }
            StorageBackend::Orm => {
                let entity_schema = Schema::new(db_backend);
                let mut posts = entity_schema.create_table_from_entity(post::Entity);
                let mut comments = entity_schema.create_table_from_entity(comment::Entity);
                vec![
                    posts.if_not_exists().to_owned(),
                    comments.if_not_exists().to_owned(),
                ]
            }
        };

        for statement in &statements {
            self.main
                .execute(db_backend.build(statement))
                .await
                .map_err(StorageError::Schema)?;
        }

        tracing::info!(storage = %backend, "Database schema ready");
        Ok(())
    }

    /// Build the repositories for the chosen strategy on this connection.
    pub fn repositories(&self, backend: StorageBackend) -> Repositories {
        match backend {
            StorageBackend::Query => Repositories {
                posts: Arc::new(QueryPostRepository::new(self.main.clone())),
                comments: Arc::new(QueryCommentRepository::new(self.main.clone())),
            },
            StorageBackend::Orm => Repositories {
                posts: Arc::new(OrmPostRepository::new(self.main.clone())),
                comments: Arc::new(OrmCommentRepository::new(self.main.clone())),
            },
        }
    }

    /// Round-trip to the database.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await
    }

    /// Release the pool.
    pub async fn close(self) -> Result<(), StorageError> {
        self.main.close().await.map_err(StorageError::Close)?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_names() {
        assert_eq!("query".parse::<StorageBackend>().unwrap(), StorageBackend::Query);
        assert_eq!(" ORM ".parse::<StorageBackend>().unwrap(), StorageBackend::Orm);
        assert!(matches!(
            "tortoise".parse::<StorageBackend>(),
            Err(StorageError::UnknownBackend(name)) if name == "tortoise"
        ));
    }

    #[test]
    fn detects_in_memory_sqlite() {
        assert!(DatabaseConfig::new("sqlite::memory:").is_in_memory());
        assert!(DatabaseConfig::new("sqlite://scratch?mode=memory").is_in_memory());
        assert!(DatabaseConfig::new("sqlite://scratch?mode=memory&cache=shared").is_in_memory());
        assert!(!DatabaseConfig::new("sqlite://postboard.db?mode=rwc").is_in_memory());
        assert!(!DatabaseConfig::new("postgres://localhost/postboard").is_in_memory());
    }
}
