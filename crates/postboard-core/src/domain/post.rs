use chrono::{DateTime, Utc};

use super::Comment;

/// Post entity - a stored blog post, without its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

/// A post together with every comment attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithComments {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// Values for a post that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post published now.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            publication_date: Utc::now(),
        }
    }

    pub fn published_at(mut self, publication_date: DateTime<Utc>) -> Self {
        self.publication_date = publication_date;
        self
    }
}

/// Partial update of a post. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_are_empty_only_without_fields() {
        assert!(PostChanges::default().is_empty());
        assert!(
            !PostChanges {
                title: Some("New".to_string()),
                content: None,
            }
            .is_empty()
        );
        assert!(
            !PostChanges {
                title: None,
                content: Some("Body".to_string()),
            }
            .is_empty()
        );
    }
}
