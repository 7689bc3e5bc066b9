use std::sync::Arc;

use crate::configuration::SearchConfiguration;
use crate::error::ConfigurationError;
use crate::helper::SharedHelper;
use crate::results::ResultsSnapshot;
use crate::state::QueryState;
use crate::templates::TemplatesConfig;

/// Builds a URL for a candidate state.
pub type UrlBuilder = Arc<dyn Fn(&QueryState) -> String + Send + Sync>;

/// Arguments of [`Widget::init`].
#[derive(Clone, Copy)]
pub struct InitContext<'a> {
    pub helper: &'a SharedHelper,
    pub state: &'a QueryState,
    pub templates_config: &'a TemplatesConfig,
}

/// Arguments of [`Widget::render`], produced once per completed search.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub results: &'a ResultsSnapshot,
    pub helper: &'a SharedHelper,
    /// Read-only view of the state at render time.
    pub state: &'a QueryState,
    pub create_url: &'a UrlBuilder,
    pub templates_config: &'a TemplatesConfig,
}

/// Lifecycle every search widget implements.
///
/// A session calls [`get_configuration`](Widget::get_configuration) once on every
/// widget before the first search, then [`init`](Widget::init) once, then
/// [`render`](Widget::render) after each completed search. User interaction
/// flows back through callbacks the widget hands to its view.
pub trait Widget: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Contribute to the search configuration.
    ///
    /// Must not mutate anything; `seed` holds the contributions gathered so far.
    fn get_configuration(&self, seed: &SearchConfiguration) -> SearchConfiguration;

    /// Wire render-time closures. Runs once, before the first render.
    fn init(&mut self, _context: InitContext<'_>) -> Result<(), ConfigurationError> {
        Ok(())
    }

    /// Derive view data from the latest results and hand it to the view.
    ///
    /// Must tolerate missing facets and statistics, and must produce the same
    /// view for the same `{results, state}`.
    fn render(&mut self, context: RenderContext<'_>);
}
