//! Search session: owns the query state, runs searches and drives widgets.
//!
//! The session folds every widget's configuration contribution into the seed
//! state, initialises the widgets, then alternates between executing the
//! pending search and rendering every widget with the fresh results. Widget
//! callbacks only ever request searches; [`SearchSession::run_pending`] turns
//! however many requests were made into a single backend call.

pub mod backend;
mod helper;
pub mod url;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use facetkit_widget_api::{
    ConfigurationError, InitContext, QueryState, RenderContext, ResultsSnapshot, SearchConfiguration,
    SearchHelper, SharedHelper, TemplatesConfig, UrlBuilder, Widget,
};
use log::{debug, info};
use thiserror::Error;

pub use backend::{BackendError, MemoryBackend, Record, SearchBackend};
pub use helper::SessionHelper;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("widget '{widget}' was added after the session started")]
    AlreadyStarted { widget: &'static str },
    #[error("the session has not been started")]
    NotStarted,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub struct SearchSession<B> {
    index: String,
    query: String,
    backend: B,
    widgets: Vec<Box<dyn Widget>>,
    helper: Arc<SessionHelper>,
    shared: SharedHelper,
    templates_config: TemplatesConfig,
    create_url: UrlBuilder,
    results: Option<ResultsSnapshot>,
    searches: usize,
}

impl<B: SearchBackend> SearchSession<B> {
    pub fn new(index: impl Into<String>, backend: B) -> Self {
        let index = index.into();
        let helper = Arc::new(SessionHelper::new(QueryState::new(
            index.clone(),
            SearchConfiguration::default(),
        )));
        let shared: SharedHelper = helper.clone();
        Self {
            index,
            query: String::new(),
            backend,
            widgets: Vec::new(),
            helper,
            shared,
            templates_config: TemplatesConfig::default(),
            create_url: Arc::new(url::query_string),
            results: None,
            searches: 0,
        }
    }

    /// Full-text query of the first search.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_templates_config(mut self, templates_config: TemplatesConfig) -> Self {
        self.templates_config = templates_config;
        self
    }

    #[must_use]
    pub fn with_url_builder(mut self, create_url: UrlBuilder) -> Self {
        self.create_url = create_url;
        self
    }

    /// Register a widget; widgets render in registration order.
    pub fn add_widget(&mut self, widget: impl Widget + 'static) -> Result<(), SessionError> {
        self.add_boxed_widget(Box::new(widget))
    }

    pub fn add_boxed_widget(&mut self, widget: Box<dyn Widget>) -> Result<(), SessionError> {
        if self.is_started() {
            return Err(SessionError::AlreadyStarted {
                widget: widget.name(),
            });
        }
        debug!("registering widget '{}'", widget.name());
        self.widgets.push(widget);
        Ok(())
    }

    /// Fold of every widget's contribution, each seeing the ones before it.
    pub fn configuration(&self) -> SearchConfiguration {
        self.widgets
            .iter()
            .fold(SearchConfiguration::default(), |merged, widget| {
                let contribution = widget.get_configuration(&merged);
                merged.merged(contribution)
            })
    }

    /// Seed the state, initialise the widgets and run the first search.
    pub fn start(&mut self) -> Result<&ResultsSnapshot, SessionError> {
        if self.is_started() {
            return Err(SessionError::AlreadyStarted { widget: "session" });
        }

        let configuration = self.configuration();
        debug!("merged configuration: {configuration:?}");
        let mut state = QueryState::new(self.index.clone(), configuration);
        state.set_query(self.query.clone());
        self.helper.replace_state(state.clone());

        for widget in &mut self.widgets {
            widget.init(InitContext {
                helper: &self.shared,
                state: &state,
                templates_config: &self.templates_config,
            })?;
        }

        self.results = Some(ResultsSnapshot::empty(state));
        self.helper.search();
        self.run_pending()?;
        self.results().ok_or(SessionError::NotStarted)
    }

    /// Execute the pending search, if any, and render every widget.
    ///
    /// Returns `false` when no search was requested since the last run.
    pub fn run_pending(&mut self) -> Result<bool, SessionError> {
        if !self.is_started() {
            return Err(SessionError::NotStarted);
        }
        if !self.helper.take_pending_search() {
            return Ok(false);
        }

        let state = self.helper.state();
        let results = self.backend.search(&state)?;
        self.searches += 1;
        info!(
            "search #{} on '{}' returned {} hits",
            self.searches,
            state.index(),
            results.nb_hits
        );

        for widget in &mut self.widgets {
            widget.render(RenderContext {
                results: &results,
                helper: &self.shared,
                state: &state,
                create_url: &self.create_url,
                templates_config: &self.templates_config,
            });
        }
        self.results = Some(results);
        Ok(true)
    }

    pub fn helper(&self) -> &SharedHelper {
        &self.shared
    }

    /// Latest results; `None` before [`start`](Self::start).
    pub fn results(&self) -> Option<&ResultsSnapshot> {
        self.results.as_ref()
    }

    pub fn searches_executed(&self) -> usize {
        self.searches
    }

    pub fn is_started(&self) -> bool {
        self.results.is_some()
    }

    pub fn state(&self) -> QueryState {
        self.helper.state()
    }
}
