//! # Postboard Core
//!
//! The domain layer of Postboard: posts, comments, pagination and the
//! storage ports both data-access strategies implement.
//! This crate contains no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
