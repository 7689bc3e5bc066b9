use std::sync::Arc;

use crate::state::{NumericOperator, QueryState};

/// Mutator of the session's [`QueryState`].
///
/// Widgets never replace the state wholesale: they apply targeted mutations and
/// then call [`search`](SearchHelper::search) once. The orchestrator decides when
/// the requested search actually runs.
pub trait SearchHelper: Send + Sync {
    /// Snapshot of the current state.
    fn state(&self) -> QueryState;

    fn toggle_refinement(&self, facet: &str, value: &str);

    fn clear_refinements(&self, attribute: &str);

    fn add_numeric_refinement(&self, attribute: &str, operator: NumericOperator, value: f64);

    fn set_index(&self, index: &str);

    fn set_query(&self, query: &str);

    /// Request a new search with the current state.
    fn search(&self);
}

/// Shared handle to the session's helper, captured by refine callbacks.
pub type SharedHelper = Arc<dyn SearchHelper>;
