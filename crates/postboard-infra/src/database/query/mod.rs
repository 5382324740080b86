//! Repositories for the `query` strategy: statements are composed with
//! `sea_query` and executed directly on the shared connection.

mod comment_repo;
mod post_repo;

pub use comment_repo::QueryCommentRepository;
pub use post_repo::QueryPostRepository;
