//! Domain entities - the core business objects.

mod comment;
mod pagination;
mod post;

pub use comment::{Comment, NewComment};
pub use pagination::{DEFAULT_LIMIT, MAX_LIMIT, MAX_SKIP, Pagination};
pub use post::{NewPost, Post, PostChanges, PostWithComments};
