//! SeaORM repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use postboard_core::RepoError;
use postboard_core::domain::{Comment, Pagination, Post, PostChanges, PostWithComments};
use postboard_core::ports::{CommentRepository, PostRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::orm_base::OrmRepository;
use super::repo_err;

/// SeaORM post repository.
pub type OrmPostRepository = OrmRepository<PostEntity>;

/// SeaORM comment repository.
pub type OrmCommentRepository = OrmRepository<CommentEntity>;

#[async_trait]
impl PostRepository for OrmPostRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<Post>, RepoError> {
        let posts = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(posts.into_iter().map(Into::into).collect())
    }

    async fn find_with_comments(&self, id: i32) -> Result<Option<PostWithComments>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?
        else {
            return Ok(None);
        };

        let comments = model
            .find_related(CommentEntity)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(Some(PostWithComments {
            post: model.into(),
            comments: comments.into_iter().map(Into::into).collect(),
        }))
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?
        else {
            return Ok(None);
        };

        let mut active = model.clone().into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }

        // An update with no SET clause is not valid SQL.
        let model = if active.is_changed() {
            let updated = active.update(&self.db).await.map_err(repo_err)?;
            tracing::info!(post_id = id, "Post updated");
            updated
        } else {
            model
        };

        Ok(Some(model.into()))
    }
}

#[async_trait]
impl CommentRepository for OrmCommentRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let comments = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(comments.into_iter().map(Into::into).collect())
    }
}
