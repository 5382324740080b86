use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, EntityTrait, IntoActiveModel, PrimaryKeyTrait,
};

use postboard_core::RepoError;
use postboard_core::ports::BaseRepository;

use super::repo_err;

/// Generic SeaORM repository implementation, shared by every entity.
pub struct OrmRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> OrmRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, N> BaseRepository<T, N, i32> for OrmRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    T: From<E::Model> + Send + Sync + 'static,
    N: Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: N) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(repo_err)?;

        tracing::debug!(table = E::default().table_name(), "Row inserted");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(repo_err)?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::debug!(table = E::default().table_name(), id, "Row deleted");
        }
        Ok(deleted)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, RepoError> {
        let found = E::find_by_id(id).one(&self.db).await.map_err(repo_err)?;

        Ok(found.is_some())
    }
}
