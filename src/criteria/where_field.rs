use serde_json::Value;

use super::{Criterion, CriterionContext};
use crate::query_builder::{Condition, QueryBuilder, WhereClause};

/// Criterion comparing one field against one value.
///
/// Defaults to equality; any SQL comparison operator can be supplied through
/// [`Where::with_operator`], and [`Where::among`] produces an `IN` list.
#[derive(Debug, Clone)]
pub struct Where {
    field: String,
    value: WhereValue,
    operator: String,
}

#[derive(Debug, Clone)]
enum WhereValue {
    Single(Value),
    List(Vec<Value>),
}

impl Where {
    /// Equality comparison: `field = value`
    pub fn new(field: &str, value: Value) -> Self {
        Self::with_operator(field, "=", value)
    }

    /// Comparison with an explicit operator: `field <operator> value`
    pub fn with_operator(field: &str, operator: &str, value: Value) -> Self {
        Self {
            field: field.to_string(),
            value: WhereValue::Single(value),
            operator: operator.to_string(),
        }
    }

    /// Membership comparison: `field IN (values...)`
    pub fn among(field: &str, values: Vec<Value>) -> Self {
        Self {
            field: field.to_string(),
            value: WhereValue::List(values),
            operator: "in".to_string(),
        }
    }

    /// Field this criterion filters on
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Operator this criterion compares with
    pub fn operator(&self) -> &str {
        &self.operator
    }
}

impl Criterion for Where {
    fn apply(&self, query: QueryBuilder, _ctx: &CriterionContext) -> QueryBuilder {
        match &self.value {
            WhereValue::List(values) => query.where_in(&self.field, values.clone()),
            WhereValue::Single(value) if self.operator == "=" => {
                query.where_eq(&self.field, value.clone())
            }
            WhereValue::Single(value) => query.where_op(&self.field, &self.operator, value.clone()),
        }
    }
}

/// Criterion matching records that satisfy any of several comparisons
/// (an `OR` group attached to the query as one clause).
///
/// An empty group attaches nothing.
#[derive(Debug, Clone, Default)]
pub struct AnyOf {
    comparisons: Vec<(String, String, Value)>,
}

impl AnyOf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality alternative: `field = value`
    pub fn eq(self, field: &str, value: Value) -> Self {
        self.cmp(field, "=", value)
    }

    /// Add an alternative with an explicit operator
    pub fn cmp(mut self, field: &str, operator: &str, value: Value) -> Self {
        self.comparisons
            .push((field.to_string(), operator.to_string(), value));
        self
    }
}

impl Criterion for AnyOf {
    fn apply(&self, query: QueryBuilder, _ctx: &CriterionContext) -> QueryBuilder {
        if self.comparisons.is_empty() {
            return query;
        }

        let conditions: Vec<Condition> = self
            .comparisons
            .iter()
            .map(|(field, operator, value)| Condition::comparison(field, operator, value.clone()))
            .collect();
        query.where_clause(WhereClause::or(conditions))
    }
}
