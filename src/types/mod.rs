//! Shared types for the data-access layer.

mod pagination;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
