//! # Criteria
//!
//! Composable predicates that mutate a query handle, and the stack that
//! applies them.
//!
//! A [`Criterion`] is an immutable filter descriptor: given a query builder
//! and the repository context it produces a new builder with its predicate
//! attached. Criteria never own the query; they receive and return the handle
//! so they can be folded in sequence.
//!
//! - [`stack`] - ordered criteria collection with one-shot skip semantics
//! - [`where_field`] - the concrete field/value/operator criterion

pub mod stack;
pub mod where_field;

pub use stack::CriteriaStack;
pub use where_field::{AnyOf, Where};

use crate::query_builder::QueryBuilder;

/// Repository context handed to criteria when they are applied.
#[derive(Debug, Clone, Copy)]
pub struct CriterionContext {
    /// Table the bound model persists to
    pub table: &'static str,
    /// Primary-key column of the bound model
    pub primary_key: &'static str,
}

impl CriterionContext {
    pub fn new(table: &'static str, primary_key: &'static str) -> Self {
        Self { table, primary_key }
    }
}

/// A composable query predicate.
///
/// Implementations must be stateless beyond their constructor arguments:
/// applying the same criterion twice to equivalent builders must produce
/// equivalent builders.
pub trait Criterion: Send + Sync {
    /// Attach this criterion's predicate to the query and return the handle.
    fn apply(&self, query: QueryBuilder, ctx: &CriterionContext) -> QueryBuilder;
}
