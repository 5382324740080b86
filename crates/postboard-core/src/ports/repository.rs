use async_trait::async_trait;

use crate::domain::{Comment, NewComment, NewPost, Pagination, Post, PostChanges, PostWithComments};
use crate::error::RepoError;

/// Generic repository trait defining the CRUD operations every stored
/// entity supports. `N` is the not-yet-stored form of `T`.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity; storage assigns the ID.
    async fn insert(&self, entity: N) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns `false` if nothing was deleted.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;

    /// Check whether an entity with this ID exists.
    async fn exists_by_id(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, NewPost, i32> {
    /// List posts in ascending id order within the given window.
    async fn find_all(&self, page: Pagination) -> Result<Vec<Post>, RepoError>;

    /// Load a post together with all of its comments.
    async fn find_with_comments(&self, id: i32) -> Result<Option<PostWithComments>, RepoError>;

    /// Apply a partial update. Returns `None` if the post does not exist.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, NewComment, i32> {
    /// All comments of a post in ascending id order.
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;
}
