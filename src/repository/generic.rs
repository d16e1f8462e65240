//! Generic repository parameterized over an entity and its active model.

use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel,
};
use validator::Validate;

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use crate::context::DataContext;

/// Generic repository: a typed pass-through forwarding CRUD and pagination
/// calls to the shared [`DataContext`].
///
/// Holds no state of its own beyond the context reference, so cloning is
/// cheap and repositories for different entities may share one context:
///
/// ```ignore
/// type UserRepository = Repository<user::Entity, user::ActiveModel>;
///
/// let users: UserRepository = ctx.repository();
/// ```
pub struct Repository<E, A>
where
    E: EntityTrait,
    A: ActiveModelTrait<Entity = E>,
{
    ctx: Arc<DataContext>,
    entity: PhantomData<fn() -> (E, A)>,
}

impl<E, A> Repository<E, A>
where
    E: EntityTrait,
    A: ActiveModelTrait<Entity = E>,
{
    /// Create a repository bound to the given context
    pub fn new(ctx: Arc<DataContext>) -> Self {
        Self {
            ctx,
            entity: PhantomData,
        }
    }
}

impl<E, A> Clone for Repository<E, A>
where
    E: EntityTrait,
    A: ActiveModelTrait<Entity = E>,
{
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
            entity: PhantomData,
        }
    }
}

impl<E, A> ReadRepository<E, E::Model> for Repository<E, A>
where
    E: EntityTrait,
    E::Model: Send + Sync + FromQueryResult,
    A: ActiveModelTrait<Entity = E>,
{
    fn db(&self) -> &DatabaseConnection {
        self.ctx.connection()
    }
}

impl<E, A> WriteRepository<E, E::Model, A> for Repository<E, A>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A> + Validate + Clone + Send + Sync + 'static,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    fn context(&self) -> &DataContext {
        &self.ctx
    }
}

impl<E, A> DeleteRepository<E, E::Model> for Repository<E, A>
where
    E: EntityTrait,
    E::Model: Send + 'static,
    A: ActiveModelTrait<Entity = E>,
{
    fn context(&self) -> &DataContext {
        &self.ctx
    }
}
