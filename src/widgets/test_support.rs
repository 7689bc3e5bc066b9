use std::sync::Arc;

use facetkit_widget_api::{
    ConfigurationError, InitContext, QueryState, RenderContext, ResultsSnapshot, SearchHelper,
    SharedHelper, TemplatesConfig, UrlBuilder, Widget,
};

use crate::render::{MemoryContainer, View};
use crate::session::{SessionHelper, url::query_string};

/// Drives a single widget through its lifecycle without a backend.
pub(crate) struct Harness {
    pub(crate) helper: Arc<SessionHelper>,
    shared: SharedHelper,
    create_url: UrlBuilder,
    templates_config: TemplatesConfig,
}

impl Harness {
    pub(crate) fn new(state: QueryState) -> Self {
        let helper = Arc::new(SessionHelper::new(state));
        let shared: SharedHelper = helper.clone();
        Self {
            helper,
            shared,
            create_url: Arc::new(query_string),
            templates_config: TemplatesConfig::default(),
        }
    }

    /// Seed the helper state from the widget's own configuration.
    pub(crate) fn for_widget(widget: &dyn Widget) -> Self {
        let configuration = widget.get_configuration(&Default::default());
        Self::new(QueryState::new("products", configuration))
    }

    pub(crate) fn init(&self, widget: &mut dyn Widget) -> Result<(), ConfigurationError> {
        let state = self.helper.state();
        widget.init(InitContext {
            helper: &self.shared,
            state: &state,
            templates_config: &self.templates_config,
        })
    }

    pub(crate) fn render(&self, widget: &mut dyn Widget, results: &ResultsSnapshot) {
        let state = self.helper.state();
        widget.render(RenderContext {
            results,
            helper: &self.shared,
            state: &state,
            create_url: &self.create_url,
            templates_config: &self.templates_config,
        });
    }

    /// Results whose refinement state matches the helper's current state.
    pub(crate) fn results(&self, results: ResultsSnapshot) -> ResultsSnapshot {
        ResultsSnapshot {
            state: self.helper.state(),
            ..results
        }
    }
}

pub(crate) fn mounted(container: &MemoryContainer) -> View {
    container.view().expect("a view was mounted")
}

pub(crate) fn view_json(container: &MemoryContainer) -> String {
    serde_json::to_string(&mounted(container)).expect("serialize view")
}
