use super::{Pagination, WhereClause};

/// Mutable query handle the repository accumulates criteria onto.
///
/// Built lazily from the bound model's table, cached per repository instance,
/// and invalidated after every terminal read. Builder methods consume and
/// return `self` so criteria can fold over the handle.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    base_table: String,
    select_fields: Vec<String>,
    where_clauses: Vec<WhereClause>,
    order_by: Vec<String>,
    pagination: Option<Pagination>,
    relations: Vec<String>,
}

impl QueryBuilder {
    /// Create a new query builder for the given table
    pub fn new(table: &str) -> Self {
        Self {
            base_table: table.to_string(),
            select_fields: vec!["*".to_string()],
            where_clauses: Vec::new(),
            order_by: Vec::new(),
            pagination: None,
            relations: Vec::new(),
        }
    }

    /// Set specific fields to select
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Add a WHERE clause
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        self.where_clauses.push(clause);
        self
    }

    /// Add a simple equality WHERE condition
    pub fn where_eq(self, field: &str, value: serde_json::Value) -> Self {
        self.where_clause(WhereClause::simple(field, "=", value))
    }

    /// Add a comparison WHERE condition with an explicit operator
    pub fn where_op(self, field: &str, operator: &str, value: serde_json::Value) -> Self {
        self.where_clause(WhereClause::simple(field, operator, value))
    }

    /// Add WHERE IN condition
    pub fn where_in(self, field: &str, values: Vec<serde_json::Value>) -> Self {
        self.where_clause(WhereClause::in_condition(field, values))
    }

    /// Add ORDER BY clause
    pub fn order_by(mut self, field: &str, direction: &str) -> Self {
        self.order_by.push(format!("{field} {direction}"));
        self
    }

    /// Add LIMIT clause
    pub fn limit(mut self, limit: u32) -> Self {
        if let Some(ref mut pagination) = self.pagination {
            pagination.limit = Some(limit);
        } else {
            self.pagination = Some(Pagination::limit_only(limit));
        }
        self
    }

    /// Add OFFSET clause
    pub fn offset(mut self, offset: u32) -> Self {
        if let Some(ref mut pagination) = self.pagination {
            pagination.offset = Some(offset);
        } else {
            self.pagination = Some(Pagination::offset_only(offset));
        }
        self
    }

    /// Record a relation to eager-load alongside the result set.
    ///
    /// The builder only carries the names; hydration is the engine's concern.
    pub fn with_relation(mut self, name: &str) -> Self {
        self.relations.push(name.to_string());
        self
    }

    /// Table this query selects from
    pub fn table(&self) -> &str {
        &self.base_table
    }

    /// WHERE clauses accumulated so far, in application order
    pub fn wheres(&self) -> &[WhereClause] {
        &self.where_clauses
    }

    /// ORDER BY entries accumulated so far
    pub fn ordering(&self) -> &[String] {
        &self.order_by
    }

    /// Eager-load relation names recorded so far
    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    /// Current LIMIT/OFFSET, if any
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Build the complete SQL query string
    pub fn build_sql(&self) -> String {
        let mut sql = String::new();

        sql.push_str("SELECT ");
        sql.push_str(&self.select_fields.join(", "));
        sql.push_str(&format!(" FROM {}", self.base_table));

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            let where_parts: Vec<String> = self
                .where_clauses
                .iter()
                .map(|clause| clause.to_sql())
                .collect();
            sql.push_str(&where_parts.join(" AND "));
        }

        if !self.order_by.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }

        if let Some(ref pagination) = self.pagination {
            sql.push_str(&pagination.to_sql());
        }

        sql
    }

    /// Build a COUNT variant of this query.
    ///
    /// Ordering and pagination are stripped so the count reflects the full
    /// filtered set, not the requested page.
    pub fn count_sql(&self) -> String {
        let mut count_builder = self.clone();
        count_builder.select_fields = vec!["COUNT(*)".to_string()];
        count_builder.order_by.clear();
        count_builder.pagination = None;

        count_builder.build_sql()
    }
}
