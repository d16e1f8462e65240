//! Persistence context implementing the Unit of Work pattern.
//!
//! The context buffers created/updated/deleted markers staged by repositories
//! and applies the whole change set inside one database transaction when
//! `commit()` is called. Field-level validation runs for every staged
//! create/update before any statement is issued; failures across the change
//! set are aggregated into a single [`DataError::Validation`].

use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, Insert, IntoActiveModel, Iterable,
    ModelTrait, PrimaryKeyToColumn, QueryFilter, TransactionTrait,
};
use validator::{Validate, ValidationErrors};

use crate::errors::{DataError, DataResult};
use crate::repository::Repository;

/// Lifecycle transition staged on the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Applies one staged change within the commit transaction,
/// returning the number of affected rows.
type ApplyFn =
    Box<dyn for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<u64, DbErr>> + Send>;

/// Runs field-level validation for one staged change.
type CheckFn = Box<dyn FnOnce() -> Result<(), ValidationErrors> + Send>;

struct PendingChange {
    kind: ChangeKind,
    table: String,
    check: Option<CheckFn>,
    apply: ApplyFn,
}

/// Unit of Work over a SeaORM connection.
///
/// Repositories hold a shared reference to the context; the context holds the
/// connection and the list of pending changes. The context itself is cheap to
/// share behind an `Arc` and safe to use from multiple repositories at once,
/// though commit semantics are those of a single unit of work.
pub struct DataContext {
    db: DatabaseConnection,
    pending: Mutex<Vec<PendingChange>>,
}

impl DataContext {
    /// Create a new context over an established connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Get the underlying connection for read queries
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Create a repository bound to this context
    pub fn repository<E, A>(self: &Arc<Self>) -> Repository<E, A>
    where
        E: EntityTrait,
        A: ActiveModelTrait<Entity = E>,
    {
        Repository::new(Arc::clone(self))
    }

    /// Number of changes staged but not yet committed
    pub fn pending_count(&self) -> usize {
        self.lock_pending().len()
    }

    /// Whether any change is staged
    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Discard all staged changes without touching the database
    pub fn clear(&self) {
        self.lock_pending().clear();
    }

    /// Stage an entity as newly created.
    ///
    /// The insert statement is built and executed only on [`commit`](Self::commit).
    pub fn mark_created<E, A>(&self, entity: E::Model)
    where
        E: EntityTrait,
        E::Model: IntoActiveModel<A> + Validate + Clone + Send + 'static,
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
    {
        let table = table_of::<E>();
        tracing::debug!(table = %table, "entity marked as created");

        let snapshot = entity.clone();
        let apply: ApplyFn = Box::new(move |txn| {
            Box::pin(async move {
                Insert::one(entity.into_active_model())
                    .exec_without_returning(txn)
                    .await
            })
        });

        self.push(PendingChange {
            kind: ChangeKind::Created,
            table,
            check: Some(Box::new(move || snapshot.validate())),
            apply,
        });
    }

    /// Stage an entity as updated.
    ///
    /// On commit every non-key column is written back, keyed by an equality
    /// condition built dynamically over the primary-key column(s).
    pub fn mark_updated<E, A>(&self, entity: E::Model)
    where
        E: EntityTrait,
        E::Model: IntoActiveModel<A> + Validate + Clone + Send + 'static,
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
    {
        let table = table_of::<E>();
        tracing::debug!(table = %table, "entity marked as updated");

        let snapshot = entity.clone();
        let apply: ApplyFn = Box::new(move |txn| {
            Box::pin(async move {
                let cond = pk_condition::<E>(&entity);
                let mut active = entity.into_active_model().reset_all();
                for key in E::PrimaryKey::iter() {
                    active.not_set(key.into_column());
                }
                E::update_many()
                    .set(active)
                    .filter(cond)
                    .exec(txn)
                    .await
                    .map(|res| res.rows_affected)
            })
        });

        self.push(PendingChange {
            kind: ChangeKind::Updated,
            table,
            check: Some(Box::new(move || snapshot.validate())),
            apply,
        });
    }

    /// Stage an entity as deleted, keyed by the same dynamic
    /// primary-key equality condition used for updates.
    pub fn mark_deleted<E>(&self, entity: E::Model)
    where
        E: EntityTrait,
        E::Model: Send + 'static,
    {
        let table = table_of::<E>();
        tracing::debug!(table = %table, "entity marked as deleted");

        let apply: ApplyFn = Box::new(move |txn| {
            Box::pin(async move {
                let cond = pk_condition::<E>(&entity);
                E::delete_many()
                    .filter(cond)
                    .exec(txn)
                    .await
                    .map(|res| res.rows_affected)
            })
        });

        self.push(PendingChange {
            kind: ChangeKind::Deleted,
            table,
            check: None,
            apply,
        });
    }

    /// Commit all staged changes to the backing store.
    ///
    /// Validation runs first for the whole change set; any failure aborts the
    /// commit before a transaction is opened, with every failure aggregated
    /// into one [`DataError::Validation`]. A failed change set is discarded.
    /// Statement errors roll the transaction back and propagate unmodified.
    ///
    /// Returns the total number of affected rows.
    pub async fn commit(&self) -> DataResult<u64> {
        let changes: Vec<PendingChange> = {
            let mut pending = self.lock_pending();
            pending.drain(..).collect()
        };

        if changes.is_empty() {
            return Ok(0);
        }

        let mut failures = Vec::new();
        let mut applies = Vec::with_capacity(changes.len());
        for change in changes {
            let PendingChange {
                kind,
                table,
                check,
                apply,
            } = change;

            if let Some(check) = check {
                if let Err(errors) = check() {
                    failures.push(format!("{}: {}", table, errors));
                    continue;
                }
            }
            applies.push((kind, table, apply));
        }

        if !failures.is_empty() {
            return Err(DataError::Validation(failures.join("; ")));
        }

        let txn = self.db.begin().await?;
        let result = apply_all(&txn, applies).await;

        match result {
            Ok(affected) => {
                txn.commit().await?;
                tracing::info!(affected, "change set committed");
                Ok(affected)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(err.into())
            }
        }
    }

    fn push(&self, change: PendingChange) {
        self.lock_pending().push(change);
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Vec<PendingChange>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn apply_all(
    txn: &DatabaseTransaction,
    applies: Vec<(ChangeKind, String, ApplyFn)>,
) -> Result<u64, DbErr> {
    let mut affected: u64 = 0;
    for (kind, table, apply) in applies {
        let rows = apply(txn).await?;
        tracing::debug!(?kind, table = %table, rows, "change applied");
        affected += rows;
    }
    Ok(affected)
}

/// Equality condition over the primary-key column(s) of a model,
/// built dynamically so composite keys work as well.
fn pk_condition<E>(model: &E::Model) -> Condition
where
    E: EntityTrait,
{
    let mut cond = Condition::all();
    for key in E::PrimaryKey::iter() {
        let col = key.into_column();
        cond = cond.add(col.eq(model.get(col)));
    }
    cond
}

fn table_of<E: EntityTrait>() -> String {
    E::default().table_name().to_owned()
}
