//! # Repository
//!
//! The root abstraction: routes every read and write through a pluggable
//! model factory and a stack of composable criteria, against a lazily-built,
//! cached query handle executed by a [`QueryEngine`].
//!
//! ## State and concurrency
//!
//! A repository instance owns mutable per-chain state: the current model
//! handle, the cached query handle, and the criteria stack with its one-shot
//! skip flag. Every operation takes `&mut self`, so one instance serves one
//! logical operation sequence at a time; concurrent hosts should construct
//! one repository per request (construction performs a single factory call).
//!
//! After every terminal read (`all`, `first`, `paginate`) the model handle is
//! replaced with a fresh factory product and the query cache is cleared, so
//! no operation observes another operation's accumulated state. `find`,
//! `find_where`, and `criteria_use` work on brand-new query handles and never
//! touch the caches.

use serde_json::json;
use tracing::debug;

use crate::criteria::{CriteriaStack, Criterion, CriterionContext, Where};
use crate::engine::{DeleteOutcome, QueryEngine};
use crate::error::{RepositoryError, Result};
use crate::model::{Model, ModelFactory, SCENARIO_DEFAULT};
use crate::query_builder::{PageInfo, Paginated, QueryBuilder, ALL_COLUMNS};

/// Page size used when callers have no preference.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Generic repository over a model type, its factory, and a query engine.
pub struct Repository<M, F, E>
where
    M: Model,
    F: ModelFactory<M>,
    E: QueryEngine<M>,
{
    factory: F,
    engine: E,
    criteria: CriteriaStack,
    model: M,
    query: Option<QueryBuilder>,
}

impl<M, F, E> Repository<M, F, E>
where
    M: Model,
    F: ModelFactory<M>,
    E: QueryEngine<M>,
{
    /// Construct a repository; performs exactly one factory call.
    pub fn new(factory: F, engine: E) -> Result<Self> {
        let model = factory.make()?;
        Ok(Self {
            factory,
            engine,
            criteria: CriteriaStack::new(),
            model,
            query: None,
        })
    }

    /// The model handle bound to the current operation chain.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The engine this repository executes against.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn context() -> CriterionContext {
        CriterionContext::new(M::table(), M::primary_key())
    }

    /// Take the cached query handle, lazily building one when absent.
    fn take_query(&mut self) -> QueryBuilder {
        self.query
            .take()
            .unwrap_or_else(|| QueryBuilder::new(M::table()))
    }

    /// Replace the model handle and clear the query cache. Always both,
    /// after every terminal read.
    fn reset_state(&mut self) -> Result<()> {
        self.model = self.factory.make()?;
        self.query = None;
        Ok(())
    }

    fn guard_scenario(&self, model: &M, scenario: &str) -> Result<()> {
        if model.scenarios().contains(&scenario) {
            Ok(())
        } else {
            Err(RepositoryError::ScenarioNotFound {
                scenario: scenario.to_string(),
            })
        }
    }

    // ---- criteria -------------------------------------------------------

    /// Append a criterion to the stack.
    pub fn criteria_push(&mut self, criterion: Box<dyn Criterion>) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    /// Remove and return the last-pushed criterion.
    pub fn criteria_pop(&mut self) -> Result<Box<dyn Criterion>> {
        self.criteria.pop()
    }

    /// The stack's full ordered criteria sequence.
    pub fn criteria_get(&self) -> &[Box<dyn Criterion>] {
        self.criteria.get()
    }

    /// Clear the stack.
    pub fn criteria_reset(&mut self) -> &mut Self {
        self.criteria.reset();
        self
    }

    /// Arm the one-shot skip: the next `criteria_apply` leaves the query
    /// untouched, then the flag clears.
    pub fn criteria_skip(&mut self) -> &mut Self {
        self.criteria.skip_next();
        self
    }

    /// Fold the stack over the cached query handle (building it lazily) and
    /// re-cache the result. Consumes the skip flag if armed.
    pub fn criteria_apply(&mut self) -> &mut Self {
        let ctx = Self::context();
        let query = self.take_query();
        let applied = self.criteria.apply(query, &ctx);
        self.query = Some(applied);
        self
    }

    /// One-off filtered fetch: apply exactly the given criterion to a
    /// brand-new query and execute it. The stack and skip flag are untouched.
    pub async fn criteria_use(&self, criterion: &dyn Criterion) -> Result<Vec<M>> {
        let ctx = Self::context();
        let query = criterion.apply(QueryBuilder::new(M::table()), &ctx);
        Ok(self.engine.fetch_all(&query).await?)
    }

    // ---- reads ----------------------------------------------------------

    /// Fetch every record matching the active criteria. Never fails on an
    /// empty result.
    pub async fn all(&mut self, columns: &[&str]) -> Result<Vec<M>> {
        self.criteria_apply();
        let query = self.take_query().select(columns);
        debug!(table = M::table(), sql = %query.build_sql(), "repository all");
        let result = self.engine.fetch_all(&query).await?;
        self.reset_state()?;
        Ok(result)
    }

    /// Fetch the first record matching the active criteria.
    pub async fn first(&mut self, columns: &[&str]) -> Result<M> {
        self.criteria_apply();
        let query = self.take_query().select(columns);
        let result = self.engine.fetch_one(&query).await?;
        self.reset_state()?;
        result.ok_or(RepositoryError::ModelNotFound)
    }

    /// Fetch one record by primary key, ignoring the stack and any cached
    /// query.
    pub async fn find(&mut self, id: i64, columns: &[&str]) -> Result<M> {
        self.find_optional(id, columns)
            .await?
            .ok_or(RepositoryError::ModelNotFound)
    }

    async fn find_optional(&mut self, id: i64, columns: &[&str]) -> Result<Option<M>> {
        let ctx = Self::context();
        let criterion = Where::new(M::primary_key(), json!(id));
        let query = criterion
            .apply(QueryBuilder::new(M::table()), &ctx)
            .select(columns);
        debug!(table = M::table(), id, "repository find");
        Ok(self.engine.fetch_one(&query).await?)
    }

    /// Fetch one record matching every given field/value pair (logical AND),
    /// on a fresh query. Unlike `find`/`first`, a miss is `Ok(None)`.
    pub async fn find_where(
        &mut self,
        conditions: &[(&str, serde_json::Value)],
        columns: &[&str],
    ) -> Result<Option<M>> {
        let ctx = Self::context();
        let mut query = QueryBuilder::new(M::table());
        for (field, value) in conditions {
            query = Where::new(field, value.clone()).apply(query, &ctx);
        }
        Ok(self.engine.fetch_one(&query.select(columns)).await?)
    }

    /// Fetch one page of records matching the active criteria, along with the
    /// total filtered count.
    ///
    /// Page numbering starts at 1: `offset = page * (page_size - 1)`.
    /// A zero page size is rejected before the query is touched.
    pub async fn paginate(
        &mut self,
        page: u32,
        page_size: u32,
        columns: &[&str],
    ) -> Result<Paginated<M>> {
        if page_size == 0 {
            return Err(RepositoryError::misconfigured(
                "page size must be positive",
            ));
        }

        self.criteria_apply();
        let query = self.take_query();
        let total_count = self.engine.count(&query).await?;

        let page_query = query
            .select(columns)
            .limit(page_size)
            .offset(page * (page_size - 1));
        debug!(
            table = M::table(),
            page,
            page_size,
            total_count,
            "repository paginate"
        );
        let data = self.engine.fetch_all(&page_query).await?;
        self.reset_state()?;

        Ok(Paginated {
            data,
            pagination: PageInfo::new(total_count, page_size, page),
        })
    }

    // ---- writes ---------------------------------------------------------

    /// Persist a new entity from a fresh model under the given scenario.
    pub async fn create(&mut self, attributes: M::Attributes, scenario: &str) -> Result<M> {
        let mut model = self.factory.make()?;
        self.guard_scenario(&model, scenario)?;
        model.assign(scenario, attributes);

        debug!(table = M::table(), scenario, "repository create");
        if !self.engine.save(&mut model).await? {
            return Err(RepositoryError::NotPersisted);
        }
        Ok(model)
    }

    /// Update the entity with the given primary key under the given scenario.
    ///
    /// The scenario is validated against a fresh model before the lookup
    /// runs, so an undeclared scenario never reaches the engine.
    pub async fn update(&mut self, id: i64, attributes: M::Attributes, scenario: &str) -> Result<M> {
        let probe = self.factory.make()?;
        self.guard_scenario(&probe, scenario)?;

        let mut model = self.find(id, ALL_COLUMNS).await?;
        model.assign(scenario, attributes);

        debug!(table = M::table(), id, scenario, "repository update");
        if !self.engine.save(&mut model).await? {
            return Err(RepositoryError::NotPersisted);
        }
        Ok(model)
    }

    /// Update the entity if it exists, otherwise create it.
    ///
    /// Both branches run under the default scenario; the caller-supplied
    /// scenario is accepted for interface compatibility but not forwarded
    /// (see DESIGN.md).
    pub async fn update_or_create(
        &mut self,
        id: i64,
        attributes: M::Attributes,
        scenario: &str,
    ) -> Result<M> {
        let _ = scenario;
        let probe = self.factory.make()?;
        self.guard_scenario(&probe, SCENARIO_DEFAULT)?;

        match self.find_optional(id, ALL_COLUMNS).await? {
            Some(mut model) => {
                model.assign(SCENARIO_DEFAULT, attributes);
                if !self.engine.save(&mut model).await? {
                    return Err(RepositoryError::NotPersisted);
                }
                Ok(model)
            }
            None => self.create(attributes, SCENARIO_DEFAULT).await,
        }
    }

    /// Delete the entity with the given primary key and return it.
    ///
    /// Zero affected rows is still success; only an explicit failure signal
    /// from the engine maps to an error.
    pub async fn delete(&mut self, id: i64) -> Result<M> {
        let model = self.find(id, ALL_COLUMNS).await?;

        debug!(table = M::table(), id, "repository delete");
        match self.engine.delete(&model).await? {
            DeleteOutcome::Failed => Err(RepositoryError::NotPersisted),
            DeleteOutcome::Affected(_) => Ok(model),
        }
    }

    // ---- query shaping --------------------------------------------------

    /// Order the current query by the given column/direction pairs.
    ///
    /// Every direction must be exactly `"asc"` or `"desc"`; validation runs
    /// before the cached query is touched, so a bad direction leaves the
    /// handle exactly as it was.
    pub fn order_by(&mut self, columns: &[(&str, &str)]) -> Result<&mut Self> {
        for (column, direction) in columns {
            if *direction != "asc" && *direction != "desc" {
                return Err(RepositoryError::misconfigured(format!(
                    "invalid order direction {direction:?} for column {column:?}"
                )));
            }
        }

        let mut query = self.take_query();
        for (column, direction) in columns {
            query = query.order_by(column, direction);
        }
        self.query = Some(query);
        Ok(self)
    }

    /// Request the given relations be eager-loaded with the current query.
    pub fn with_relations(&mut self, relations: &[&str]) -> &mut Self {
        let mut query = self.take_query();
        for relation in relations {
            query = query.with_relation(relation);
        }
        self.query = Some(query);
        self
    }
}

impl<M, F, E> std::fmt::Debug for Repository<M, F, E>
where
    M: Model,
    F: ModelFactory<M>,
    E: QueryEngine<M>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &M::table())
            .field("criteria", &self.criteria)
            .field("query_cached", &self.query.is_some())
            .finish()
    }
}
