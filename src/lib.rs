#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # repokit
//!
//! Criteria-based repository abstraction over a pluggable query engine.
//!
//! ## Overview
//!
//! A [`Repository`] decouples callers from a concrete persistence layer by
//! routing every read and write through a pluggable model factory and a stack
//! of composable filter objects ("criteria"). Criteria accumulate onto a
//! lazily-built, cached [`QueryBuilder`]; execution is delegated to a
//! [`QueryEngine`] implementation, and writes are gated by named validation
//! scenarios the model declares.
//!
//! ## Module Organization
//!
//! - [`repository`] - the root repository with read/write/shaping verbs
//! - [`criteria`] - the `Criterion` trait, the criteria stack, and the
//!   concrete field comparison criterion
//! - [`query_builder`] - the mutable query handle and its SQL fragments
//! - [`model`] - the model capability contract and model factory
//! - [`engine`] - the query-execution collaborator (PostgreSQL impl behind
//!   the `postgres` feature)
//! - [`error`] - structured error handling
//! - [`logging`] - opt-in tracing initialization
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use repokit::{Repository, Where};
//! use serde_json::json;
//!
//! let mut repo = Repository::new(widget_factory, engine)?;
//! repo.criteria_push(Box::new(Where::new("active", json!(true))));
//!
//! // stack applies to reads...
//! let active = repo.all(&["*"]).await?;
//!
//! // ...unless bypassed once
//! repo.criteria_skip();
//! let everything = repo.all(&["*"]).await?;
//! ```

pub mod criteria;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod query_builder;
pub mod repository;

pub use criteria::{AnyOf, CriteriaStack, Criterion, CriterionContext, Where};
pub use engine::{DeleteOutcome, EngineError, QueryEngine};
pub use error::{RepositoryError, Result};
pub use model::{Model, ModelFactory, SCENARIO_DEFAULT};
pub use query_builder::{PageInfo, Paginated, QueryBuilder, ALL_COLUMNS};
pub use repository::{Repository, DEFAULT_PAGE_SIZE};

#[cfg(feature = "postgres")]
pub use engine::{PgEngine, PgPersist};
