//! Selector switching the searched index, typically one replica per sort order.

use std::sync::Arc;

use facetkit_widget_api::{
    ConfigurationError, InitContext, RenderContext, SearchConfiguration, SearchHelper, Widget,
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::render::{
    Callback, Container, TemplateProps, View, ViewFactory, ViewProps, auto_hide_container, view_factory,
};

const USAGE: &str = "Usage:
sort_by_selector(SortBySelectorOptions {
  container,
  indices,
  [auto_hide_container=false]
})";

/// An index the user can switch to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOption {
    pub name: String,
    pub label: String,
}

impl IndexOption {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Default)]
pub struct SortBySelectorOptions {
    pub container: Option<Arc<dyn Container>>,
    pub indices: Vec<IndexOption>,
    pub auto_hide_container: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorProps {
    pub options: Vec<SelectorOption>,
    pub current_value: String,
    pub should_auto_hide_container: bool,
    #[serde(skip)]
    pub template_props: TemplateProps,
    #[serde(skip)]
    pub set_value: Callback<String>,
}

impl ViewProps for SelectorProps {
    fn should_auto_hide_container(&self) -> bool {
        self.should_auto_hide_container
    }

    fn template_props(&self) -> &TemplateProps {
        &self.template_props
    }
}

pub struct SortBySelector {
    container: Arc<dyn Container>,
    indices: Vec<IndexOption>,
    view: ViewFactory<SelectorProps>,
}

pub fn sort_by_selector(options: SortBySelectorOptions) -> Result<SortBySelector, ConfigurationError> {
    let SortBySelectorOptions {
        container,
        indices,
        auto_hide_container: auto_hide,
    } = options;

    let container =
        container.ok_or_else(|| ConfigurationError::usage("sort_by_selector", "container", USAGE))?;
    if indices.is_empty() {
        return Err(ConfigurationError::usage("sort_by_selector", "indices", USAGE));
    }

    let mut view = view_factory(View::Selector);
    if auto_hide {
        view = auto_hide_container(view);
    }

    Ok(SortBySelector {
        container,
        indices,
        view,
    })
}

fn set_index(helper: &dyn SearchHelper, index: &str) {
    helper.set_index(index);
    helper.search();
}

impl Widget for SortBySelector {
    fn name(&self) -> &'static str {
        "sort_by_selector"
    }

    fn get_configuration(&self, _seed: &SearchConfiguration) -> SearchConfiguration {
        SearchConfiguration::default()
    }

    fn init(&mut self, context: InitContext<'_>) -> Result<(), ConfigurationError> {
        let index = context.state.index();
        if self.indices.iter().any(|option| option.name == index) {
            return Ok(());
        }
        Err(ConfigurationError::UnknownIndex {
            index: index.to_string(),
            available: self
                .indices
                .iter()
                .map(|option| option.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    fn render(&mut self, context: RenderContext<'_>) {
        let options: Vec<SelectorOption> = self
            .indices
            .iter()
            .map(|option| SelectorOption {
                value: option.name.clone(),
                label: option.label.clone(),
            })
            .collect();
        debug!("sort selector rendering current index '{}'", context.state.index());

        let helper = Arc::clone(context.helper);
        let props = SelectorProps {
            should_auto_hide_container: context.results.nb_hits == 0,
            options,
            current_value: context.state.index().to_string(),
            template_props: TemplateProps::default(),
            set_value: Callback::new(move |index: String| set_index(helper.as_ref(), &index)),
        };
        self.container.mount((self.view)(props));
    }
}
