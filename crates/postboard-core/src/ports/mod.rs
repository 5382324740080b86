//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" each data-access strategy must implement.

mod repository;

pub use repository::{BaseRepository, CommentRepository, PostRepository};
