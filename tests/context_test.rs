//! Unit-of-work behavior tests against a mocked database.

mod common;

use std::sync::Arc;

use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

use common::{init_tracing, sample_task, task};
use repokit::{DataContext, DataError};

type TaskEntity = task::Entity;
type TaskActiveModel = task::ActiveModel;

#[tokio::test]
async fn commit_sums_affected_rows_across_changes() {
    init_tracing();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            },
        ])
        .into_connection();

    let ctx = Arc::new(DataContext::new(db));
    ctx.mark_created::<TaskEntity, TaskActiveModel>(sample_task("one"));
    ctx.mark_deleted::<TaskEntity>(sample_task("two"));

    assert_eq!(ctx.commit().await.unwrap(), 3);
    assert!(!ctx.has_pending());
}

#[tokio::test]
async fn commit_propagates_database_errors_unmodified() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([DbErr::Custom("duplicate key".to_string())])
        .into_connection();

    let ctx = DataContext::new(db);
    ctx.mark_created::<TaskEntity, TaskActiveModel>(sample_task("doomed"));

    let err = ctx.commit().await.unwrap_err();
    match err {
        DataError::Database(db_err) => {
            assert!(db_err.to_string().contains("duplicate key"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
    assert!(!ctx.has_pending());
}

#[tokio::test]
async fn validation_stops_the_commit_before_any_statement() {
    // No exec results appended: a statement reaching the mock would error
    // with an unexpected result type rather than a validation failure.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let ctx = DataContext::new(db);
    ctx.mark_created::<TaskEntity, TaskActiveModel>(sample_task("fine"));
    ctx.mark_updated::<TaskEntity, TaskActiveModel>(sample_task(""));

    let err = ctx.commit().await.unwrap_err();
    assert!(matches!(err, DataError::Validation(_)));
}

#[tokio::test]
async fn deletes_are_never_validated() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let ctx = DataContext::new(db);
    // An empty title would fail create/update validation.
    ctx.mark_deleted::<TaskEntity>(sample_task(""));

    assert_eq!(ctx.commit().await.unwrap(), 1);
}

#[tokio::test]
async fn pending_bookkeeping_tracks_stage_and_clear() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let ctx = DataContext::new(db);

    assert!(!ctx.has_pending());
    ctx.mark_created::<TaskEntity, TaskActiveModel>(sample_task("a"));
    ctx.mark_updated::<TaskEntity, TaskActiveModel>(sample_task("b"));
    assert_eq!(ctx.pending_count(), 2);

    ctx.clear();
    assert!(!ctx.has_pending());
    assert_eq!(ctx.commit().await.unwrap(), 0);
}
