//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! These traits provide a foundation for all repositories with
//! common CRUD operations that can be composed as needed. Read operations
//! query the connection directly; write operations stage lifecycle markers
//! on the [`DataContext`] and take effect on `save()`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, DatabaseConnection, EntityTrait,
    FromQueryResult, IntoActiveModel, Order, PaginatorTrait, PrimaryKeyTrait, QueryFilter,
    QueryOrder, Select,
};
use validator::Validate;

use crate::context::DataContext;
use crate::errors::{DataError, DataResult};
use crate::types::{Paginated, PaginationParams};

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<E, M>: Send + Sync
where
    E: EntityTrait<Model = M>,
    M: Send + Sync + FromQueryResult,
{
    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    /// Lazy queryable view over all entities; no ordering guarantee.
    ///
    /// Nothing is executed until the returned `Select` is awaited,
    /// so callers may refine it with further filters or ordering.
    fn query(&self) -> Select<E> {
        E::find()
    }

    /// Fetch all entities
    async fn get_all(&self) -> DataResult<Vec<M>> {
        E::find().all(self.db()).await.map_err(Into::into)
    }

    /// Fetch the entity whose identifier equals `id`, if any.
    ///
    /// The equality predicate against the identifier column(s) is built by
    /// the query layer from the primary-key definition.
    async fn get_single(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> DataResult<Option<M>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send,
    {
        E::find_by_id(id).one(self.db()).await.map_err(Into::into)
    }

    /// Fetch one page of entities.
    ///
    /// The optional filter applies first, then the optional ordering by key
    /// (ascending or descending), then the page slice. The result carries the
    /// total count of matching entities, so all pages together cover every
    /// match exactly once.
    async fn paginate(
        &self,
        params: &PaginationParams,
        order: Option<(E::Column, Order)>,
        filter: Option<Condition>,
    ) -> DataResult<Paginated<M>>
    where
        E::Column: Send,
    {
        let mut query = E::find();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }
        if let Some((key, direction)) = order {
            query = query.order_by(key, direction);
        }

        let paginator = query.paginate(self.db(), params.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(params.page_index()).await?;

        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    /// Count all entities
    async fn count(&self) -> DataResult<u64> {
        E::find().count(self.db()).await.map_err(Into::into)
    }
}

/// Write operations (Command) - Single Responsibility
///
/// `add` and `update` only stage the change; nothing reaches the database
/// until [`save`](WriteRepository::save).
#[async_trait]
pub trait WriteRepository<E, M, A>: Send + Sync
where
    E: EntityTrait<Model = M>,
    M: IntoActiveModel<A> + Validate + Clone + Send + Sync + 'static,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    /// Get the persistence context reference
    fn context(&self) -> &DataContext;

    /// Register the entity as newly created and return it.
    ///
    /// Fails with [`DataError::MissingInput`] when the entity is absent.
    fn add(&self, entity: Option<M>) -> DataResult<M> {
        let entity = entity.ok_or(DataError::MissingInput("entity"))?;
        self.context().mark_created::<E, A>(entity.clone());
        Ok(entity)
    }

    /// Mark the entity as updated and return it.
    ///
    /// Fails with [`DataError::MissingInput`] when the entity is absent.
    fn update(&self, entity: Option<M>) -> DataResult<M> {
        let entity = entity.ok_or(DataError::MissingInput("entity"))?;
        self.context().mark_updated::<E, A>(entity.clone());
        Ok(entity)
    }

    /// Commit pending creates/updates/deletes to the backing store.
    ///
    /// Returns the number of affected rows.
    async fn save(&self) -> DataResult<u64> {
        self.context().commit().await
    }
}

/// Delete operations - Single Responsibility
pub trait DeleteRepository<E, M>: Send + Sync
where
    E: EntityTrait<Model = M>,
    M: Send + 'static,
{
    /// Get the persistence context reference
    fn context(&self) -> &DataContext;

    /// Mark the entity as deleted; takes effect on `save()`.
    fn delete(&self, entity: M) {
        self.context().mark_deleted::<E>(entity);
    }
}

/// Full CRUD repository - Combines all operations
/// Follows Open/Closed Principle: extend by implementing individual traits
pub trait CrudRepository<E, M, A>:
    ReadRepository<E, M> + WriteRepository<E, M, A> + DeleteRepository<E, M>
where
    E: EntityTrait<Model = M>,
    M: FromQueryResult + IntoActiveModel<A> + Validate + Clone + Send + Sync + 'static,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
}

// Auto-implement CrudRepository for types implementing all traits
impl<T, E, M, A> CrudRepository<E, M, A> for T
where
    T: ReadRepository<E, M> + WriteRepository<E, M, A> + DeleteRepository<E, M>,
    E: EntityTrait<Model = M>,
    M: FromQueryResult + IntoActiveModel<A> + Validate + Clone + Send + Sync + 'static,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
}
