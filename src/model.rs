//! # Model Contract
//!
//! The capability set a persistence model must expose to be managed by a
//! [`crate::repository::Repository`], and the factory that produces fresh
//! instances of it.
//!
//! The factory's output satisfying the model contract is a compile-time
//! bound, not a runtime check: a repository can only be constructed over
//! `M: Model`.

use crate::error::Result;

/// Scenario every model is expected to declare for unqualified writes.
pub const SCENARIO_DEFAULT: &str = "default";

/// A persistence entity the repository can manage.
///
/// Attribute assignment is typed per model: each model declares an
/// `Attributes` struct and decides, under the given scenario, which of its
/// fields the assignment touches.
pub trait Model: Send + Sync {
    /// Typed attribute-update structure for this model.
    type Attributes: Send;

    /// Table the model persists to.
    fn table() -> &'static str;

    /// Primary-key column name.
    fn primary_key() -> &'static str;

    /// Scenario names this model declares. Assignments are only accepted
    /// under a declared scenario.
    fn scenarios(&self) -> &[&str];

    /// Apply an attribute update under the given scenario.
    ///
    /// Callers guarantee the scenario is declared; the model decides which
    /// fields the scenario exposes.
    fn assign(&mut self, scenario: &str, attributes: Self::Attributes);
}

/// Produces a fresh model instance on demand. Pure factory, no caching.
pub trait ModelFactory<M: Model>: Send + Sync {
    /// Resolve a new instance of the bound model type.
    ///
    /// Resolution failures surface as
    /// [`crate::error::RepositoryError::Misconfigured`].
    fn make(&self) -> Result<M>;
}

impl<M, F> ModelFactory<M> for F
where
    M: Model,
    F: Fn() -> Result<M> + Send + Sync,
{
    fn make(&self) -> Result<M> {
        (self)()
    }
}
