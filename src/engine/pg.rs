//! PostgreSQL query engine over sqlx.
//!
//! Read paths execute the builder's generated SQL through `query_as`. Write
//! paths delegate to the model itself via [`PgPersist`], since each model owns
//! its INSERT/UPDATE/DELETE statements.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::warn;

use super::{DeleteOutcome, EngineError, QueryEngine};
use crate::model::Model;
use crate::query_builder::QueryBuilder;

/// Persistence statements a model supplies to run against PostgreSQL.
#[async_trait]
pub trait PgPersist: Send + Sync {
    /// Insert or update this model's row. `Ok(false)` means the backend
    /// rejected the write without a driver error.
    async fn persist(&mut self, pool: &PgPool) -> Result<bool, sqlx::Error>;

    /// Delete this model's row.
    async fn remove(&self, pool: &PgPool) -> Result<DeleteOutcome, sqlx::Error>;
}

/// [`QueryEngine`] implementation backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgEngine {
    pool: PgPool,
}

impl PgEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // TODO: hydrate QueryBuilder::relations() once models expose relation
    // metadata; until then the drop is logged so callers can see it.
    fn warn_dropped_relations(query: &QueryBuilder) {
        if !query.relations().is_empty() {
            warn!(
                table = query.table(),
                relations = ?query.relations(),
                "eager-load relations are not hydrated by PgEngine and were dropped"
            );
        }
    }
}

#[async_trait]
impl<M> QueryEngine<M> for PgEngine
where
    M: Model + PgPersist + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin,
{
    async fn fetch_all(&self, query: &QueryBuilder) -> Result<Vec<M>, EngineError> {
        Self::warn_dropped_relations(query);
        let sql = query.build_sql();
        Ok(sqlx::query_as::<_, M>(&sql).fetch_all(&self.pool).await?)
    }

    async fn fetch_one(&self, query: &QueryBuilder) -> Result<Option<M>, EngineError> {
        Self::warn_dropped_relations(query);
        let sql = query.build_sql();
        Ok(sqlx::query_as::<_, M>(&sql)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn count(&self, query: &QueryBuilder) -> Result<i64, EngineError> {
        let sql = query.count_sql();
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        Ok(row.get::<i64, _>(0))
    }

    async fn save(&self, model: &mut M) -> Result<bool, EngineError> {
        Ok(model.persist(&self.pool).await?)
    }

    async fn delete(&self, model: &M) -> Result<DeleteOutcome, EngineError> {
        Ok(model.remove(&self.pool).await?)
    }
}
