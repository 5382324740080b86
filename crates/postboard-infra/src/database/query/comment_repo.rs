use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Order, Query, SelectStatement};
use sea_orm::{ConnectionTrait, DbConn, FromQueryResult};

use postboard_core::RepoError;
use postboard_core::domain::{Comment, NewComment};
use postboard_core::ports::{BaseRepository, CommentRepository};

use crate::database::repo_err;
use crate::database::schema::{COMMENT_COLUMNS, Comments};

#[derive(Debug, FromQueryResult)]
struct CommentRow {
    id: i32,
    post_id: i32,
    content: String,
    publication_date: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            content: row.content,
            publication_date: row.publication_date,
        }
    }
}

/// Comment repository built on composed SQL statements.
#[derive(Clone)]
pub struct QueryCommentRepository {
    db: DbConn,
}

impl QueryCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn select() -> SelectStatement {
        Query::select()
            .columns(COMMENT_COLUMNS)
            .from(Comments::Table)
            .to_owned()
    }

    async fn fetch_all(&self, stmt: &SelectStatement) -> Result<Vec<Comment>, RepoError> {
        let backend = self.db.get_database_backend();
        let rows = CommentRow::find_by_statement(backend.build(stmt))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl BaseRepository<Comment, NewComment, i32> for QueryCommentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        let stmt = Self::select()
            .and_where(Expr::col(Comments::Id).eq(id))
            .to_owned();
        let backend = self.db.get_database_backend();
        let row = CommentRow::find_by_statement(backend.build(&stmt))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut stmt = Query::insert();
        stmt.into_table(Comments::Table)
            .columns([Comments::PostId, Comments::Content, Comments::PublicationDate])
            .values([
                comment.post_id.into(),
                comment.content.into(),
                comment.publication_date.into(),
            ])
            .map_err(|e| RepoError::Query(e.to_string()))?
            .returning(Query::returning().columns(COMMENT_COLUMNS));

        let backend = self.db.get_database_backend();
        let row = CommentRow::find_by_statement(backend.build(&stmt))
            .one(&self.db)
            .await
            .map_err(repo_err)?
            .ok_or_else(|| RepoError::Query("insert returned no row".to_string()))?;

        tracing::info!(comment_id = row.id, post_id = row.post_id, "Comment created");
        Ok(row.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let stmt = Query::delete()
            .from_table(Comments::Table)
            .and_where(Expr::col(Comments::Id).eq(id))
            .to_owned();
        let backend = self.db.get_database_backend();
        let result = self.db.execute(backend.build(&stmt)).await.map_err(repo_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, RepoError> {
        let stmt = Query::select()
            .column(Comments::Id)
            .from(Comments::Table)
            .and_where(Expr::col(Comments::Id).eq(id))
            .limit(1)
            .to_owned();
        let backend = self.db.get_database_backend();
        let row = self.db.query_one(backend.build(&stmt)).await.map_err(repo_err)?;

        Ok(row.is_some())
    }
}

#[async_trait]
impl CommentRepository for QueryCommentRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let stmt = Self::select()
            .and_where(Expr::col(Comments::PostId).eq(post_id))
            .order_by(Comments::Id, Order::Asc)
            .to_owned();

        self.fetch_all(&stmt).await
    }
}
