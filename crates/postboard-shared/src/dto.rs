//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use postboard_core::domain::{
    Comment, NewComment, NewPost, Pagination, Post, PostChanges, PostWithComments,
};

/// Accepts RFC 3339 timestamps and offset-less ISO 8601 ones, read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(date.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

/// Query string of `GET /posts`. Negative values fail to deserialize.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaginationQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl From<PaginationQuery> for Pagination {
    fn from(query: PaginationQuery) -> Self {
        Pagination::new(query.skip, query.limit)
    }
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub publication_date: DateTime<Utc>,
}

impl From<PostCreate> for NewPost {
    fn from(req: PostCreate) -> Self {
        NewPost {
            title: req.title,
            content: req.content,
            publication_date: req.publication_date,
        }
    }
}

/// Request to change some fields of a post. Absent and `null` fields are
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPartialUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl From<PostPartialUpdate> for PostChanges {
    fn from(req: PostPartialUpdate) -> Self {
        PostChanges {
            title: req.title,
            content: req.content,
        }
    }
}

/// Request to comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub post_id: i32,
    pub content: String,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub publication_date: DateTime<Utc>,
}

impl From<CommentCreate> for NewComment {
    fn from(req: CommentCreate) -> Self {
        NewComment {
            post_id: req.post_id,
            content: req.content,
            publication_date: req.publication_date,
        }
    }
}

/// A stored post, without its comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            publication_date: post.publication_date,
        }
    }
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub post_id: i32,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            publication_date: comment.publication_date,
        }
    }
}

/// Public representation of a post: the post with its comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPublicResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
    pub comments: Vec<CommentResponse>,
}

impl From<PostWithComments> for PostPublicResponse {
    fn from(found: PostWithComments) -> Self {
        let PostWithComments { post, comments } = found;
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            publication_date: post.publication_date,
            comments: comments.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publication_date_defaults_to_now() {
        let before = Utc::now();
        let req: PostCreate = serde_json::from_str(r#"{"title":"A","content":"B"}"#).unwrap();
        assert!(req.publication_date >= before);
        assert!(req.publication_date <= Utc::now());
    }

    #[test]
    fn timestamps_without_offset_are_utc() {
        let req: PostCreate = serde_json::from_str(
            r#"{"title":"A","content":"B","publication_date":"2023-01-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(req.publication_date.to_rfc3339(), "2023-01-01T10:00:00+00:00");

        let req: CommentCreate = serde_json::from_str(
            r#"{"post_id":1,"content":"C","publication_date":"2023-01-01 10:00:00.250"}"#,
        )
        .unwrap();
        assert_eq!(req.publication_date.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn offset_timestamps_are_converted_to_utc() {
        let req: PostCreate = serde_json::from_str(
            r#"{"title":"A","content":"B","publication_date":"2023-01-01T12:00:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(req.publication_date.to_rfc3339(), "2023-01-01T10:00:00+00:00");

        assert!(
            serde_json::from_str::<PostCreate>(
                r#"{"title":"A","content":"B","publication_date":"yesterday"}"#
            )
            .is_err()
        );
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let err = serde_json::from_str::<PostCreate>(r#"{"title":"A"}"#).unwrap_err();
        assert!(err.to_string().contains("content"));

        assert!(serde_json::from_str::<CommentCreate>(r#"{"content":"C"}"#).is_err());
        assert!(
            serde_json::from_str::<CommentCreate>(r#"{"post_id":"one","content":"C"}"#).is_err()
        );
    }

    #[test]
    fn partial_update_keeps_only_present_fields() {
        let changes: PostChanges = serde_json::from_str::<PostPartialUpdate>(r#"{"title":"T"}"#)
            .unwrap()
            .into();
        assert_eq!(changes.title.as_deref(), Some("T"));
        assert!(changes.content.is_none());

        let empty: PostChanges = serde_json::from_str::<PostPartialUpdate>("{}")
            .unwrap()
            .into();
        assert!(empty.is_empty());
    }

    #[test]
    fn negative_pagination_does_not_deserialize() {
        assert!(serde_json::from_str::<PaginationQuery>(r#"{"skip":-1}"#).is_err());
        let page: Pagination = serde_json::from_str::<PaginationQuery>(r#"{"limit":500}"#)
            .unwrap()
            .into();
        assert_eq!(page, Pagination { skip: 0, limit: 100 });
    }

    #[test]
    fn public_post_nests_comments() {
        let date = Utc::now();
        let body = PostPublicResponse::from(PostWithComments {
            post: Post {
                id: 1,
                title: "A".to_string(),
                content: "B".to_string(),
                publication_date: date,
            },
            comments: vec![Comment {
                id: 3,
                post_id: 1,
                content: "C".to_string(),
                publication_date: date,
            }],
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["comments"][0]["id"], 3);
        assert_eq!(json["comments"][0]["post_id"], 1);
        assert_eq!(json["comments"][0]["content"], "C");
    }
}
