use chrono::{DateTime, Utc};

/// Comment entity - attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

/// Values for a comment that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i32,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

impl NewComment {
    /// Create a new comment on `post_id`, published now.
    pub fn new(post_id: i32, content: impl Into<String>) -> Self {
        Self {
            post_id,
            content: content.into(),
            publication_date: Utc::now(),
        }
    }
}
