//! # Postboard Infrastructure
//!
//! Concrete implementations of the storage ports defined in `postboard-core`.
//!
//! Two data-access strategies share one connection pool and one schema:
//!
//! - `query` - SQL composed with `sea_query` against the table definitions in
//!   [`database::schema`], rows decoded with `FromQueryResult`.
//! - `orm` - SeaORM entities in [`database::entity`] with a navigable
//!   post/comments relation.

pub mod database;

pub use database::{DatabaseConfig, DatabaseConnections, Repositories, StorageBackend, StorageError};
