use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Order, Query, SelectStatement, SimpleExpr};
use sea_orm::{ConnectionTrait, DbConn, FromQueryResult};

use postboard_core::RepoError;
use postboard_core::domain::{NewPost, Pagination, Post, PostChanges, PostWithComments};
use postboard_core::ports::{BaseRepository, CommentRepository, PostRepository};

use super::QueryCommentRepository;
use crate::database::repo_err;
use crate::database::schema::{POST_COLUMNS, Posts};

#[derive(Debug, FromQueryResult)]
struct PostRow {
    id: i32,
    title: String,
    content: String,
    publication_date: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            publication_date: row.publication_date,
        }
    }
}

/// Post repository built on composed SQL statements.
///
/// Comments of a post are read through [`QueryCommentRepository`] on the
/// same connection.
#[derive(Clone)]
pub struct QueryPostRepository {
    db: DbConn,
    comments: QueryCommentRepository,
}

impl QueryPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self {
            comments: QueryCommentRepository::new(db.clone()),
            db,
        }
    }

    fn select() -> SelectStatement {
        Query::select()
            .columns(POST_COLUMNS)
            .from(Posts::Table)
            .to_owned()
    }

    async fn fetch_one(&self, stmt: &SelectStatement) -> Result<Option<Post>, RepoError> {
        let backend = self.db.get_database_backend();
        let row = PostRow::find_by_statement(backend.build(stmt))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl BaseRepository<Post, NewPost, i32> for QueryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let stmt = Self::select()
            .and_where(Expr::col(Posts::Id).eq(id))
            .to_owned();

        self.fetch_one(&stmt).await
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut stmt = Query::insert();
        stmt.into_table(Posts::Table)
            .columns([Posts::Title, Posts::Content, Posts::PublicationDate])
            .values([
                post.title.into(),
                post.content.into(),
                post.publication_date.into(),
            ])
            .map_err(|e| RepoError::Query(e.to_string()))?
            .returning(Query::returning().columns(POST_COLUMNS));

        let backend = self.db.get_database_backend();
        let row = PostRow::find_by_statement(backend.build(&stmt))
            .one(&self.db)
            .await
            .map_err(repo_err)?
            .ok_or_else(|| RepoError::Query("insert returned no row".to_string()))?;

        tracing::info!(post_id = row.id, "Post created");
        Ok(row.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let stmt = Query::delete()
            .from_table(Posts::Table)
            .and_where(Expr::col(Posts::Id).eq(id))
            .to_owned();
        let backend = self.db.get_database_backend();
        let result = self.db.execute(backend.build(&stmt)).await.map_err(repo_err)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(post_id = id, "Post deleted");
        }
        Ok(deleted)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, RepoError> {
        let stmt = Query::select()
            .column(Posts::Id)
            .from(Posts::Table)
            .and_where(Expr::col(Posts::Id).eq(id))
            .limit(1)
            .to_owned();
        let backend = self.db.get_database_backend();
        let row = self.db.query_one(backend.build(&stmt)).await.map_err(repo_err)?;

        Ok(row.is_some())
    }
}

#[async_trait]
impl PostRepository for QueryPostRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<Post>, RepoError> {
        let stmt = Self::select()
            .order_by(Posts::Id, Order::Asc)
            .limit(page.limit)
            .offset(page.skip)
            .to_owned();
        let backend = self.db.get_database_backend();
        let rows = PostRow::find_by_statement(backend.build(&stmt))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_with_comments(&self, id: i32) -> Result<Option<PostWithComments>, RepoError> {
        let Some(post) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let comments = self.comments.find_by_post_id(id).await?;

        Ok(Some(PostWithComments { post, comments }))
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        if !changes.is_empty() {
            let mut values: Vec<(Posts, SimpleExpr)> = Vec::with_capacity(2);
            if let Some(title) = changes.title {
                values.push((Posts::Title, title.into()));
            }
            if let Some(content) = changes.content {
                values.push((Posts::Content, content.into()));
            }

            let stmt = Query::update()
                .table(Posts::Table)
                .values(values)
                .and_where(Expr::col(Posts::Id).eq(id))
                .to_owned();
            let backend = self.db.get_database_backend();
            let result = self.db.execute(backend.build(&stmt)).await.map_err(repo_err)?;

            if result.rows_affected() == 0 {
                return Ok(None);
            }
            tracing::info!(post_id = id, "Post updated");
        }

        self.find_by_id(id).await
    }
}
