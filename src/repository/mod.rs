//! Repository layer - Data access abstraction
//!
//! Repositories provide collection-like CRUD semantics over the persistence
//! context, following the Repository pattern for clean separation of concerns.

mod base;
mod generic;

pub use base::{CrudRepository, DeleteRepository, ReadRepository, WriteRepository};
pub use generic::Repository;
