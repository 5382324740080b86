use chrono::{TimeZone, Utc};

use postboard_core::RepoError;
use postboard_core::domain::{NewComment, NewPost, Pagination, PostChanges};

use super::{DatabaseConfig, DatabaseConnections, Repositories, StorageBackend};

fn published() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
}

async fn sqlite(backend: StorageBackend) -> (DatabaseConnections, Repositories) {
    let db = DatabaseConnections::init(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    db.create_schema(backend).await.unwrap();
    let repos = db.repositories(backend);
    (db, repos)
}

async fn create_then_fetch(repos: &Repositories) {
    let created = repos
        .posts
        .insert(NewPost::new("A", "B").published_at(published()))
        .await
        .unwrap();
    assert_eq!(created.title, "A");
    assert_eq!(created.content, "B");
    assert_eq!(created.publication_date, published());

    let fetched = repos.posts.find_with_comments(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.post, created);
    assert!(fetched.comments.is_empty());

    assert!(repos.posts.exists_by_id(created.id).await.unwrap());
    assert!(!repos.posts.exists_by_id(created.id + 1000).await.unwrap());
    assert!(repos.posts.find_with_comments(created.id + 1000).await.unwrap().is_none());
}

async fn list_respects_window(repos: &Repositories) {
    for i in 0..5 {
        repos
            .posts
            .insert(NewPost::new(format!("post {i}"), "body"))
            .await
            .unwrap();
    }

    let all = repos.posts.find_all(Pagination::new(None, None)).await.unwrap();
    let titles: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["post 0", "post 1", "post 2", "post 3", "post 4"]);

    let window = repos
        .posts
        .find_all(Pagination::new(Some(1), Some(2)))
        .await
        .unwrap();
    let titles: Vec<_> = window.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["post 1", "post 2"]);

    let past_end = repos
        .posts
        .find_all(Pagination::new(Some(10), None))
        .await
        .unwrap();
    assert!(past_end.is_empty());

    let empty_page = repos
        .posts
        .find_all(Pagination::new(None, Some(0)))
        .await
        .unwrap();
    assert!(empty_page.is_empty());
}

async fn partial_update_keeps_other_fields(repos: &Repositories) {
    let post = repos.posts.insert(NewPost::new("A", "B")).await.unwrap();

    let renamed = repos
        .posts
        .update(
            post.id,
            PostChanges {
                title: Some("A2".to_string()),
                content: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.title, "A2");
    assert_eq!(renamed.content, "B");
    assert_eq!(renamed.publication_date, post.publication_date);

    let rewritten = repos
        .posts
        .update(
            post.id,
            PostChanges {
                title: None,
                content: Some("B2".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rewritten.title, "A2");
    assert_eq!(rewritten.content, "B2");

    let untouched = repos
        .posts
        .update(post.id, PostChanges::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched, rewritten);

    let missing = repos
        .posts
        .update(
            post.id + 1000,
            PostChanges {
                title: Some("x".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

async fn comments_attach_and_cascade(repos: &Repositories) {
    let post = repos.posts.insert(NewPost::new("A", "B")).await.unwrap();
    let other = repos.posts.insert(NewPost::new("C", "D")).await.unwrap();

    let comment = repos
        .comments
        .insert(NewComment::new(post.id, "C"))
        .await
        .unwrap();
    assert_eq!(comment.post_id, post.id);
    assert_eq!(comment.content, "C");
    repos
        .comments
        .insert(NewComment::new(other.id, "elsewhere"))
        .await
        .unwrap();

    let found = repos.posts.find_with_comments(post.id).await.unwrap().unwrap();
    assert_eq!(found.comments, vec![comment.clone()]);
    assert_eq!(
        repos.comments.find_by_id(comment.id).await.unwrap(),
        Some(comment.clone())
    );

    assert!(repos.posts.delete(post.id).await.unwrap());
    assert!(!repos.posts.delete(post.id).await.unwrap());
    assert!(repos.posts.find_by_id(post.id).await.unwrap().is_none());
    assert!(repos.comments.find_by_post_id(post.id).await.unwrap().is_empty());
    assert!(!repos.comments.exists_by_id(comment.id).await.unwrap());
    assert_eq!(repos.comments.find_by_post_id(other.id).await.unwrap().len(), 1);
}

async fn comment_on_unknown_post_is_a_constraint_error(repos: &Repositories) {
    let err = repos
        .comments
        .insert(NewComment::new(404, "orphan"))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)), "got {err:?}");
}

/// Runs each case once per strategy, each on a fresh in-memory database.
macro_rules! contract_tests {
    ($($name:ident => $case:ident),* $(,)?) => {
        $(
            mod $name {
                use super::*;

                #[tokio::test]
                async fn query() {
                    let (db, repos) = sqlite(StorageBackend::Query).await;
                    $case(&repos).await;
                    db.close().await.unwrap();
                }

                #[tokio::test]
                async fn orm() {
                    let (db, repos) = sqlite(StorageBackend::Orm).await;
                    $case(&repos).await;
                    db.close().await.unwrap();
                }
            }
        )*
    };
}

contract_tests! {
    create_then_fetch_by_id => create_then_fetch,
    list_posts_window => list_respects_window,
    partial_update => partial_update_keeps_other_fields,
    comments_and_cascade => comments_attach_and_cascade,
    comment_on_unknown_post => comment_on_unknown_post_is_a_constraint_error,
}

#[tokio::test]
async fn test_schemas_are_interchangeable() {
    let db = DatabaseConnections::init(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    db.create_schema(StorageBackend::Orm).await.unwrap();
    // Tables already exist; the query definitions must not fail on them.
    db.create_schema(StorageBackend::Query).await.unwrap();

    let orm = db.repositories(StorageBackend::Orm);
    let query = db.repositories(StorageBackend::Query);

    let post = orm.posts.insert(NewPost::new("A", "B")).await.unwrap();
    query
        .comments
        .insert(NewComment::new(post.id, "C"))
        .await
        .unwrap();

    let via_orm = orm.posts.find_with_comments(post.id).await.unwrap().unwrap();
    let via_query = query.posts.find_with_comments(post.id).await.unwrap().unwrap();
    assert_eq!(via_orm, via_query);
}

#[tokio::test]
async fn test_clones_share_one_pool() {
    let db = DatabaseConnections::init(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    db.create_schema(StorageBackend::Query).await.unwrap();

    let writer = db.clone().repositories(StorageBackend::Query);
    let post = writer.posts.insert(NewPost::new("A", "B")).await.unwrap();

    let reader = db.repositories(StorageBackend::Orm);
    assert!(reader.posts.exists_by_id(post.id).await.unwrap());

    db.close().await.unwrap();
}

#[tokio::test]
async fn test_memory_mode_url_keeps_one_database() {
    let db = DatabaseConnections::init(&DatabaseConfig::new("sqlite://postboard-scratch?mode=memory"))
        .await
        .unwrap();
    db.create_schema(StorageBackend::Query).await.unwrap();
    let repos = db.repositories(StorageBackend::Query);

    for i in 0..3 {
        repos
            .posts
            .insert(NewPost::new(format!("post {i}"), "body"))
            .await
            .unwrap();
    }
    let all = repos.posts.find_all(Pagination::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    db.close().await.unwrap();
}
