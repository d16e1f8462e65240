//! Repokit - A generic repository and unit-of-work layer over SeaORM
//!
//! This crate lets application code perform CRUD and pagination against any
//! SeaORM entity through one parameterized repository type, without touching
//! the connection or query-building API directly.
//!
//! # Architecture Layers
//!
//! - **config**: Environment-backed configuration and constants
//! - **db**: Database connection management
//! - **context**: Unit of Work buffering pending changes until commit
//! - **repository**: Generic CRUD/pagination traits and the `Repository` type
//! - **types**: Shared types (pagination)
//! - **errors**: Centralized error handling
//!
//! # Usage
//!
//! ```ignore
//! let db = Database::connect(&Config::from_env()).await?;
//! let ctx = Arc::new(DataContext::new(db.get_connection()));
//! let users: Repository<user::Entity, user::ActiveModel> = ctx.repository();
//!
//! users.add(Some(new_user))?;
//! let affected = users.save().await?;
//! let page = users.paginate(&PaginationParams::default(), None, None).await?;
//! ```

pub mod config;
pub mod context;
pub mod db;
pub mod errors;
pub mod repository;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use context::{ChangeKind, DataContext};
pub use db::Database;
pub use errors::{DataError, DataResult, OptionExt};
pub use repository::{CrudRepository, DeleteRepository, ReadRepository, Repository, WriteRepository};
pub use types::{Paginated, PaginationMeta, PaginationParams};
