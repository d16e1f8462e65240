//! Shared test fixtures.

#![allow(dead_code)]

use repokit::Repository;

/// Test entity backing the repository tests.
pub mod task {
    use sea_orm::entity::prelude::*;
    use validator::Validate;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Validate)]
    #[sea_orm(table_name = "tasks")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[validate(length(min = 1, message = "title must not be empty"))]
        pub title: String,
        pub done: bool,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub type TaskRepository = Repository<task::Entity, task::ActiveModel>;

pub fn sample_task(title: &str) -> task::Model {
    task::Model {
        id: uuid::Uuid::new_v4(),
        title: title.to_string(),
        done: false,
        created_at: chrono::Utc::now(),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
