//! # Repository Error Types
//!
//! Structured error handling for the repository layer using thiserror.
//! Every failure a repository operation can surface is enumerated here;
//! engine-level failures are wrapped rather than flattened so callers can
//! still reach the underlying database error.

use thiserror::Error;

use crate::engine::EngineError;

/// Errors surfaced by repository operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The repository was assembled with an invalid collaborator or argument:
    /// the model factory failed to resolve an instance, or an order direction
    /// other than `"asc"`/`"desc"` was supplied.
    #[error("repository misconfigured: {message}")]
    Misconfigured { message: String },

    /// `pop` was attempted on an empty criteria stack.
    #[error("criteria stack is empty")]
    CriteriaNotFound,

    /// A required single-record fetch produced no match.
    #[error("model not found")]
    ModelNotFound,

    /// The requested scenario is not declared by the model type.
    #[error("scenario not declared by model: {scenario}")]
    ScenarioNotFound { scenario: String },

    /// A save or delete reported explicit failure.
    #[error("model was not persisted")]
    NotPersisted,

    /// The query engine failed while executing a statement.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl RepositoryError {
    /// Shorthand for a misconfiguration error with a formatted message.
    pub fn misconfigured(message: impl Into<String>) -> Self {
        RepositoryError::Misconfigured {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
