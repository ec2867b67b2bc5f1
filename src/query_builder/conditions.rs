/// Represents the condition types the repository layer emits
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Simple {
        field: String,
        operator: String,
        value: serde_json::Value,
    },
    In {
        field: String,
        values: Vec<serde_json::Value>,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
}

impl Condition {
    /// Build a comparison condition.
    ///
    /// A null value degrades to `IS NULL` for `=` and `IS NOT NULL` for
    /// `!=`/`<>`, matching hash-format equality semantics.
    pub fn comparison(field: &str, operator: &str, value: serde_json::Value) -> Self {
        match (&value, operator) {
            (serde_json::Value::Null, "=") => Condition::IsNull {
                field: field.to_string(),
            },
            (serde_json::Value::Null, "!=" | "<>") => Condition::IsNotNull {
                field: field.to_string(),
            },
            _ => Condition::Simple {
                field: field.to_string(),
                operator: operator.to_string(),
                value,
            },
        }
    }

    /// Convert condition to SQL string
    pub fn to_sql(&self) -> String {
        match self {
            Condition::Simple {
                field,
                operator,
                value,
            } => {
                format!("{} {} {}", field, operator, format_value(value))
            }
            Condition::In { field, values } => {
                let value_list = values
                    .iter()
                    .map(format_value)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{field} IN ({value_list})")
            }
            Condition::IsNull { field } => {
                format!("{field} IS NULL")
            }
            Condition::IsNotNull { field } => {
                format!("{field} IS NOT NULL")
            }
        }
    }
}

/// A WHERE clause holding one or more conditions joined by a logical operator
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub conditions: Vec<Condition>,
    pub operator: LogicalOperator,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl WhereClause {
    /// Create a WHERE clause with a single comparison condition; null values
    /// degrade per [`Condition::comparison`].
    pub fn simple(field: &str, operator: &str, value: serde_json::Value) -> Self {
        Self {
            conditions: vec![Condition::comparison(field, operator, value)],
            operator: LogicalOperator::And,
        }
    }

    /// Create WHERE IN clause
    pub fn in_condition(field: &str, values: Vec<serde_json::Value>) -> Self {
        Self {
            conditions: vec![Condition::In {
                field: field.to_string(),
                values,
            }],
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with OR
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::Or,
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            return "1=1".to_string();
        }

        if self.conditions.len() == 1 {
            return self.conditions[0].to_sql();
        }

        let operator_str = match self.operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };

        let condition_sqls: Vec<String> = self.conditions.iter().map(|c| c.to_sql()).collect();

        format!("({})", condition_sqls.join(operator_str))
    }
}

/// Format a JSON value for SQL
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        _ => format!("'{}'", value.to_string().replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_condition() {
        let clause = WhereClause::simple("status", "=", json!("active"));
        assert_eq!(clause.to_sql(), "status = 'active'");
    }

    #[test]
    fn test_comparison_operator() {
        let clause = WhereClause::simple("retries", ">=", json!(3));
        assert_eq!(clause.to_sql(), "retries >= 3");
    }

    #[test]
    fn test_null_equality_becomes_is_null() {
        let clause = WhereClause::simple("deleted_at", "=", json!(null));
        assert_eq!(clause.to_sql(), "deleted_at IS NULL");

        let clause = WhereClause::simple("deleted_at", "!=", json!(null));
        assert_eq!(clause.to_sql(), "deleted_at IS NOT NULL");
    }

    #[test]
    fn test_in_condition() {
        let clause = WhereClause::in_condition("state", vec![json!("queued"), json!("running")]);
        assert_eq!(clause.to_sql(), "state IN ('queued', 'running')");
    }

    #[test]
    fn test_or_group() {
        let clause = WhereClause::or(vec![
            Condition::Simple {
                field: "owner".to_string(),
                operator: "=".to_string(),
                value: json!("alice"),
            },
            Condition::IsNull {
                field: "owner".to_string(),
            },
        ]);
        assert_eq!(clause.to_sql(), "(owner = 'alice' OR owner IS NULL)");
    }

    #[test]
    fn test_string_values_are_escaped() {
        let clause = WhereClause::simple("name", "=", json!("o'brien"));
        assert_eq!(clause.to_sql(), "name = 'o''brien'");
    }

    #[test]
    fn test_empty_clause_is_neutral() {
        let clause = WhereClause::or(vec![]);
        assert_eq!(clause.to_sql(), "1=1");
    }
}
