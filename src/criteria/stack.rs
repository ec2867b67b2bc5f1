use tracing::debug;

use super::{Criterion, CriterionContext};
use crate::error::{RepositoryError, Result};
use crate::query_builder::QueryBuilder;

/// Ordered collection of criteria owned by one repository instance.
///
/// Insertion order is application order. The skip flag is one-shot: arming it
/// bypasses exactly the next [`CriteriaStack::apply`] call, leaving the stack
/// contents untouched for later cycles.
#[derive(Default)]
pub struct CriteriaStack {
    criteria: Vec<Box<dyn Criterion>>,
    skip_next: bool,
}

impl CriteriaStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a criterion to the end of the stack. Duplicates are allowed.
    pub fn push(&mut self, criterion: Box<dyn Criterion>) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    /// Remove and return the last-pushed criterion.
    pub fn pop(&mut self) -> Result<Box<dyn Criterion>> {
        self.criteria.pop().ok_or(RepositoryError::CriteriaNotFound)
    }

    /// The full ordered sequence of criteria.
    pub fn get(&self) -> &[Box<dyn Criterion>] {
        &self.criteria
    }

    /// Clear the stack.
    pub fn reset(&mut self) -> &mut Self {
        self.criteria.clear();
        self
    }

    /// Arm the one-shot skip: the next `apply` returns its query unchanged.
    pub fn skip_next(&mut self) -> &mut Self {
        self.skip_next = true;
        self
    }

    /// Whether the skip flag is currently armed.
    pub fn skip_armed(&self) -> bool {
        self.skip_next
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Fold every criterion over the query in insertion order.
    ///
    /// If the skip flag is armed it is consumed and the query is returned
    /// unchanged; no more than one application cycle is ever skipped per arm.
    /// Repeated calls keep accumulating the same predicates onto whatever
    /// handle is passed in, so callers wanting a clean slate must reset the
    /// query between calls.
    pub fn apply(&mut self, query: QueryBuilder, ctx: &CriterionContext) -> QueryBuilder {
        if self.skip_next {
            self.skip_next = false;
            debug!(table = ctx.table, "criteria application skipped once");
            return query;
        }

        self.criteria
            .iter()
            .fold(query, |query, criterion| criterion.apply(query, ctx))
    }
}

impl std::fmt::Debug for CriteriaStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CriteriaStack")
            .field("len", &self.criteria.len())
            .field("skip_next", &self.skip_next)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Where;
    use proptest::prelude::*;
    use serde_json::json;

    fn ctx() -> CriterionContext {
        CriterionContext::new("widgets", "id")
    }

    fn where_on(field: &str) -> Box<dyn Criterion> {
        Box::new(Where::new(field, json!(1)))
    }

    /// Render a criterion's predicate by applying it to a fresh builder.
    fn predicate_sql(criterion: &dyn Criterion) -> String {
        criterion.apply(QueryBuilder::new("widgets"), &ctx()).build_sql()
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut stack = CriteriaStack::new();
        stack.push(where_on("a")).push(where_on("b"));

        assert_eq!(stack.len(), 2);
        assert_eq!(predicate_sql(stack.get()[0].as_ref()), "SELECT * FROM widgets WHERE a = 1");
        assert_eq!(predicate_sql(stack.get()[1].as_ref()), "SELECT * FROM widgets WHERE b = 1");
    }

    #[test]
    fn test_pop_removes_last_pushed() {
        let mut stack = CriteriaStack::new();
        stack.push(where_on("a")).push(where_on("b"));

        let popped = stack.pop().unwrap();
        assert!(predicate_sql(popped.as_ref()).contains("b = 1"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut stack = CriteriaStack::new();
        assert!(matches!(stack.pop(), Err(RepositoryError::CriteriaNotFound)));
    }

    #[test]
    fn test_reset_clears() {
        let mut stack = CriteriaStack::new();
        stack.push(where_on("a"));
        stack.reset();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_apply_folds_in_insertion_order() {
        let mut stack = CriteriaStack::new();
        stack.push(where_on("a")).push(where_on("b"));

        let sql = stack.apply(QueryBuilder::new("widgets"), &ctx()).build_sql();
        assert_eq!(sql, "SELECT * FROM widgets WHERE a = 1 AND b = 1");
    }

    #[test]
    fn test_skip_bypasses_exactly_one_apply() {
        let mut stack = CriteriaStack::new();
        stack.push(where_on("a"));
        stack.skip_next();

        let first = stack.apply(QueryBuilder::new("widgets"), &ctx());
        assert_eq!(first.build_sql(), "SELECT * FROM widgets");
        assert!(!stack.skip_armed());

        // the stack itself is untouched; the next cycle applies fully
        let second = stack.apply(QueryBuilder::new("widgets"), &ctx());
        assert_eq!(second.build_sql(), "SELECT * FROM widgets WHERE a = 1");
    }

    #[test]
    fn test_repeated_apply_accumulates_onto_same_handle() {
        let mut stack = CriteriaStack::new();
        stack.push(where_on("a"));

        let query = stack.apply(QueryBuilder::new("widgets"), &ctx());
        let query = stack.apply(query, &ctx());
        assert_eq!(
            query.build_sql(),
            "SELECT * FROM widgets WHERE a = 1 AND a = 1"
        );
    }

    proptest! {
        #[test]
        fn push_preserves_order_and_pop_reverses(fields in proptest::collection::vec("[a-z]{1,8}", 0..12)) {
            let mut stack = CriteriaStack::new();
            for field in &fields {
                stack.push(Box::new(Where::new(field, json!(1))));
            }

            // get() returns the pushes in insertion order
            let observed: Vec<String> = stack
                .get()
                .iter()
                .map(|criterion| predicate_sql(criterion.as_ref()))
                .collect();
            let expected: Vec<String> = fields
                .iter()
                .map(|field| format!("SELECT * FROM widgets WHERE {field} = 1"))
                .collect();
            prop_assert_eq!(observed, expected);

            // pop() drains in reverse order and then fails
            for field in fields.iter().rev() {
                let popped = stack.pop().unwrap();
                prop_assert_eq!(
                    predicate_sql(popped.as_ref()),
                    format!("SELECT * FROM widgets WHERE {field} = 1")
                );
            }
            prop_assert!(stack.pop().is_err());
        }
    }
}
