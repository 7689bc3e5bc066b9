use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use facetkit_widget_api::{NumericOperator, QueryState, SearchHelper};
use log::{trace, warn};

/// In-memory [`SearchHelper`] owning the session's query state.
///
/// Calls to [`search`](SearchHelper::search) only raise a pending flag; the
/// session turns any number of requests into a single backend search.
#[derive(Debug, Default)]
pub struct SessionHelper {
    state: Mutex<QueryState>,
    pending: AtomicBool,
    requests: AtomicU64,
}

impl SessionHelper {
    pub fn new(state: QueryState) -> Self {
        Self {
            state: Mutex::new(state),
            pending: AtomicBool::new(false),
            requests: AtomicU64::new(0),
        }
    }

    /// Total number of search requests received.
    pub fn search_requests(&self) -> u64 {
        self.requests.load(Ordering::Acquire)
    }

    pub fn has_pending_search(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Clear the pending flag, returning whether a search was requested.
    pub(crate) fn take_pending_search(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn replace_state(&self, state: QueryState) {
        *self.lock() = state;
    }

    fn lock(&self) -> MutexGuard<'_, QueryState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("query state lock was poisoned, keeping the last written state");
            poisoned.into_inner()
        })
    }

    fn update(&self, mutate: impl FnOnce(&mut QueryState)) {
        mutate(&mut *self.lock());
    }
}

impl SearchHelper for SessionHelper {
    fn state(&self) -> QueryState {
        self.lock().clone()
    }

    fn toggle_refinement(&self, facet: &str, value: &str) {
        trace!("toggle '{value}' on '{facet}'");
        self.update(|state| state.toggle_refinement(facet, value));
    }

    fn clear_refinements(&self, attribute: &str) {
        trace!("clear refinements on '{attribute}'");
        self.update(|state| state.clear_refinements(attribute));
    }

    fn add_numeric_refinement(&self, attribute: &str, operator: NumericOperator, value: f64) {
        trace!("add numeric refinement {attribute} {operator} {value}");
        self.update(|state| state.add_numeric_refinement(attribute, operator, value));
    }

    fn set_index(&self, index: &str) {
        self.update(|state| state.set_index(index));
    }

    fn set_query(&self, query: &str) {
        self.update(|state| state.set_query(query));
    }

    fn search(&self) {
        self.requests.fetch_add(1, Ordering::AcqRel);
        self.pending.store(true, Ordering::Release);
    }
}
