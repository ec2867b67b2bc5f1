//! # Query Engine
//!
//! The execution collaborator behind the repository. The repository builds
//! and accumulates [`QueryBuilder`] handles; an engine turns them into rows,
//! counts, and persisted state. Timeouts, retries, and cancellation are engine
//! concerns, never the repository's.
//!
//! [`pg`] provides the PostgreSQL implementation over sqlx.

#[cfg(feature = "postgres")]
pub mod pg;

#[cfg(feature = "postgres")]
pub use pg::{PgEngine, PgPersist};

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Model;
use crate::query_builder::QueryBuilder;

/// Failure reported by a query engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The underlying database driver failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend-specific failure that is not a driver error.
    #[error("engine failure: {message}")]
    Backend { message: String },
}

impl EngineError {
    pub fn backend(message: impl Into<String>) -> Self {
        EngineError::Backend {
            message: message.into(),
        }
    }
}

/// Result of a delete statement.
///
/// Zero affected rows is still a successful delete; only an explicit failure
/// signal from the backend counts as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Statement ran; this many rows were removed (possibly zero).
    Affected(u64),
    /// Backend explicitly reported the delete failed.
    Failed,
}

/// Executes built queries and persists models.
#[async_trait]
pub trait QueryEngine<M: Model>: Send + Sync {
    /// Execute the query and return every matching row.
    async fn fetch_all(&self, query: &QueryBuilder) -> Result<Vec<M>, EngineError>;

    /// Execute the query and return the first matching row, if any.
    async fn fetch_one(&self, query: &QueryBuilder) -> Result<Option<M>, EngineError>;

    /// Execute a count over the query's filtered set.
    async fn count(&self, query: &QueryBuilder) -> Result<i64, EngineError>;

    /// Persist the model. `false` means the backend rejected the save without
    /// erroring (validation failure, no-op insert).
    async fn save(&self, model: &mut M) -> Result<bool, EngineError>;

    /// Delete the model's persisted row.
    async fn delete(&self, model: &M) -> Result<DeleteOutcome, EngineError>;
}
