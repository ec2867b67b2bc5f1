//! # Query Builder System
//!
//! The mutable query handle criteria fold over, plus the SQL fragments it is
//! assembled from.
//!
//! ## Key Components
//!
//! - [`builder`] - Core query builder with SQL generation
//! - [`conditions`] - WHERE clause building
//! - [`pagination`] - LIMIT/OFFSET plus the page descriptor returned by
//!   `Repository::paginate`
//!
//! A [`QueryBuilder`] is cheap to construct and clone. The repository caches
//! one per instance, criteria accumulate onto it by value, and execution is
//! delegated to a [`crate::engine::QueryEngine`].

pub mod builder;
pub mod conditions;
pub mod pagination;

pub use builder::QueryBuilder;
pub use conditions::{Condition, LogicalOperator, WhereClause};
pub use pagination::{PageInfo, Paginated, Pagination};

/// Select-list used when callers do not restrict columns.
pub const ALL_COLUMNS: &[&str] = &["*"];
