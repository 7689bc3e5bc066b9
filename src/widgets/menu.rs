//! Single-select menu over a facet.
//!
//! A flat menu is modelled as a hierarchical facet with one level, which gives
//! it replace-on-toggle semantics: selecting a value drops the previous one.

use std::sync::Arc;

use facetkit_widget_api::{
    ConfigurationError, RenderContext, SearchConfiguration, SearchHelper, SortBy, Template, Templates,
    Widget,
};
use log::debug;
use serde::Serialize;

use super::facet_values::facet_values;
use super::show_more::{self, ShowMore, ShowMoreConfig};
use crate::render::{
    Callback, Container, TemplateProps, TransformData, View, ViewFactory, ViewProps, auto_hide_container,
    header_footer, prepare_template_props, view_factory,
};

pub const DEFAULT_LIMIT: usize = 10;

const USAGE: &str = "Usage:
menu(MenuOptions {
  container,
  attribute_name,
  [sort_by],
  [limit=10],
  [templates.{header,item,footer}],
  [transform_data],
  [auto_hide_container=true],
  [show_more.{templates: {active, inactive}, limit}]
})";

fn default_templates() -> Templates {
    Templates::from([
        ("header".to_string(), Template::from("")),
        ("item".to_string(), Template::from("{{name}} ({{count}})")),
        ("footer".to_string(), Template::from("")),
    ])
}

/// Options accepted by [`menu`].
#[derive(Clone)]
pub struct MenuOptions {
    pub container: Option<Arc<dyn Container>>,
    pub attribute_name: String,
    /// Ordering of the values; defaults to `count:desc`.
    pub sort_by: SortBy,
    /// Number of values fetched and shown before show-more.
    pub limit: usize,
    pub show_more: ShowMore,
    pub templates: Templates,
    pub transform_data: Option<TransformData>,
    /// Hide the container when there is nothing to select.
    pub auto_hide_container: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            container: None,
            attribute_name: String::new(),
            sort_by: SortBy::default(),
            limit: DEFAULT_LIMIT,
            show_more: ShowMore::Disabled,
            templates: Templates::new(),
            transform_data: None,
            auto_hide_container: true,
        }
    }
}

/// One selectable entry of the menu view.
#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
    pub count: u64,
    pub is_refined: bool,
    pub url: String,
}

/// Props of the refinement list view rendered by the menu.
#[derive(Debug, Clone, Serialize)]
pub struct RefinementListProps {
    pub attribute_name: String,
    pub facet_values: Vec<MenuItem>,
    /// Values shown while collapsed.
    pub limit_min: usize,
    /// Values shown once show-more is activated.
    pub limit_max: usize,
    pub show_more: bool,
    pub should_auto_hide_container: bool,
    #[serde(skip)]
    pub template_props: TemplateProps,
    #[serde(skip)]
    pub toggle_refinement: Callback<String>,
}

impl ViewProps for RefinementListProps {
    fn should_auto_hide_container(&self) -> bool {
        self.should_auto_hide_container
    }

    fn template_props(&self) -> &TemplateProps {
        &self.template_props
    }
}

pub struct Menu {
    container: Arc<dyn Container>,
    attribute_name: String,
    sort_by: SortBy,
    limit: usize,
    show_more: Option<ShowMoreConfig>,
    max_values_per_facet: usize,
    templates: Templates,
    transform_data: Option<TransformData>,
    view: ViewFactory<RefinementListProps>,
}

/// Build a menu widget, validating its options.
pub fn menu(options: MenuOptions) -> Result<Menu, ConfigurationError> {
    let MenuOptions {
        container,
        attribute_name,
        sort_by,
        limit,
        show_more,
        templates,
        transform_data,
        auto_hide_container: auto_hide,
    } = options;

    let container = container.ok_or_else(|| ConfigurationError::usage("menu", "container", USAGE))?;
    if attribute_name.is_empty() {
        return Err(ConfigurationError::usage("menu", "attribute_name", USAGE));
    }
    if limit == 0 {
        return Err(ConfigurationError::invalid_option(
            "menu",
            "limit",
            "must be greater than zero",
        ));
    }

    let show_more = show_more::resolve(&show_more)?;
    if let Some(config) = &show_more
        && config.limit <= limit
    {
        return Err(ConfigurationError::ShowMoreLimit {
            limit,
            show_more_limit: config.limit,
        });
    }
    let max_values_per_facet = show_more.as_ref().map_or(limit, |config| config.limit);

    let mut all_templates = templates;
    if let Some(config) = &show_more {
        all_templates.extend(config.templates.prefixed());
    }

    let mut view = header_footer(view_factory(View::RefinementList));
    if auto_hide {
        view = auto_hide_container(view);
    }

    Ok(Menu {
        container,
        attribute_name,
        sort_by,
        limit,
        show_more,
        max_values_per_facet,
        templates: all_templates,
        transform_data,
        view,
    })
}

impl Menu {
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Largest number of values this menu can display.
    pub fn max_values_per_facet(&self) -> usize {
        self.max_values_per_facet
    }
}

fn toggle_refinement(helper: &dyn SearchHelper, attribute: &str, value: &str) {
    helper.toggle_refinement(attribute, value);
    helper.search();
}

impl Widget for Menu {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn get_configuration(&self, seed: &SearchConfiguration) -> SearchConfiguration {
        let current = seed.max_values_per_facet.unwrap_or(0);
        SearchConfiguration::default()
            .with_hierarchical_facet(self.attribute_name.clone())
            .with_max_values_per_facet(current.max(self.max_values_per_facet))
    }

    fn render(&mut self, context: RenderContext<'_>) {
        let values = facet_values(context.results, &self.attribute_name, &self.sort_by);
        let has_no_facet_values = values.is_empty();

        let template_props = prepare_template_props(
            self.transform_data.clone(),
            &default_templates(),
            context.templates_config,
            &self.templates,
        );

        let facet_values = values
            .into_iter()
            .map(|value| {
                let candidate = context
                    .state
                    .toggled_refinement(&self.attribute_name, &value.name);
                MenuItem {
                    url: (context.create_url)(&candidate),
                    name: value.name,
                    path: value.path,
                    count: value.count,
                    is_refined: value.is_refined,
                }
            })
            .collect::<Vec<_>>();

        let helper = Arc::clone(context.helper);
        let attribute = self.attribute_name.clone();
        let toggle = Callback::new(move |value: String| toggle_refinement(helper.as_ref(), &attribute, &value));

        debug!(
            "menu '{}' rendering {} values",
            self.attribute_name,
            facet_values.len()
        );

        let props = RefinementListProps {
            attribute_name: self.attribute_name.clone(),
            facet_values,
            limit_min: self.limit,
            limit_max: self.max_values_per_facet,
            show_more: self.show_more.is_some(),
            should_auto_hide_container: has_no_facet_values,
            template_props,
            toggle_refinement: toggle,
        };
        self.container.mount((self.view)(props));
    }
}

#[cfg(test)]
mod tests {
    use facetkit_widget_api::{FacetResult, ResultsSnapshot, SearchHelper};
    use serde_json::json;

    use super::*;
    use crate::render::MemoryContainer;
    use crate::widgets::test_support::{Harness, mounted, view_json};

    fn options(container: &Arc<MemoryContainer>) -> MenuOptions {
        MenuOptions {
            container: Some(container.clone()),
            attribute_name: "brand".into(),
            ..MenuOptions::default()
        }
    }

    fn brand_results(harness: &Harness) -> ResultsSnapshot {
        harness.results(ResultsSnapshot {
            nb_hits: 13,
            hierarchical_facets: vec![FacetResult::new("brand").with_value("a", 3).with_value("b", 10)],
            ..ResultsSnapshot::default()
        })
    }

    fn list(view: &View) -> &RefinementListProps {
        match view.body() {
            View::RefinementList(props) => props,
            other => panic!("expected a refinement list, got {other:?}"),
        }
    }

    #[test]
    fn missing_container_reports_usage() {
        let err = menu(MenuOptions {
            attribute_name: "brand".into(),
            ..MenuOptions::default()
        })
        .err()
        .expect("menu without container");

        assert!(matches!(
            err,
            ConfigurationError::Usage {
                option: "container",
                ..
            }
        ));
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn missing_attribute_reports_usage() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let err = menu(MenuOptions {
            attribute_name: String::new(),
            ..options(&container)
        })
        .err()
        .expect("menu without attribute");

        assert!(matches!(
            err,
            ConfigurationError::Usage {
                option: "attribute_name",
                ..
            }
        ));
    }

    #[test]
    fn show_more_limit_below_base_limit_is_rejected() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let err = menu(MenuOptions {
            limit: 10,
            show_more: ShowMore::Custom {
                templates: Default::default(),
                limit: Some(5),
            },
            ..options(&container)
        })
        .err()
        .expect("show more limit below base limit");

        assert_eq!(
            err,
            ConfigurationError::ShowMoreLimit {
                limit: 10,
                show_more_limit: 5
            }
        );
    }

    #[test]
    fn show_more_limit_equal_to_base_limit_is_rejected() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let result = menu(MenuOptions {
            limit: 10,
            show_more: ShowMore::Custom {
                templates: Default::default(),
                limit: Some(10),
            },
            ..options(&container)
        });
        assert!(matches!(result, Err(ConfigurationError::ShowMoreLimit { .. })));
    }

    #[test]
    fn configuration_declares_a_single_level_hierarchical_facet() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let widget = menu(MenuOptions {
            show_more: ShowMore::Enabled,
            ..options(&container)
        })
        .expect("menu");

        let config = widget.get_configuration(&SearchConfiguration::default());
        assert_eq!(config.hierarchical_facets.get("brand"), Some(&vec!["brand".to_string()]));
        assert_eq!(config.max_values_per_facet, Some(show_more::DEFAULT_SHOW_MORE_LIMIT));

        let seed = SearchConfiguration::default().with_max_values_per_facet(500);
        assert_eq!(widget.get_configuration(&seed).max_values_per_facet, Some(500));
    }

    #[test]
    fn render_sorts_values_and_builds_toggle_urls() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let mut widget = menu(options(&container)).expect("menu");
        let harness = Harness::for_widget(&widget);

        harness.render(&mut widget, &brand_results(&harness));

        let view = mounted(&container);
        let props = list(&view);
        let names: Vec<&str> = props.facet_values.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(props.facet_values[0].url, "?index=products&hFR%5Bbrand%5D%5B0%5D=b");
        assert_eq!(props.limit_min, DEFAULT_LIMIT);
        assert!(!props.show_more);
        assert_eq!(
            props.template_props.render("item", &json!(props.facet_values[0])).as_deref(),
            Some("b (10)")
        );
    }

    #[test]
    fn render_is_idempotent() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let mut widget = menu(options(&container)).expect("menu");
        let harness = Harness::for_widget(&widget);
        let results = brand_results(&harness);

        harness.render(&mut widget, &results);
        let first = view_json(&container);
        harness.render(&mut widget, &results);
        let second = view_json(&container);

        assert_eq!(first, second);
        assert_eq!(container.mounts(), 2);
    }

    #[test]
    fn empty_results_hide_the_container() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let mut widget = menu(options(&container)).expect("menu");
        let harness = Harness::for_widget(&widget);

        harness.render(&mut widget, &ResultsSnapshot::default());
        assert!(mounted(&container).is_hidden());
    }

    #[test]
    fn empty_results_without_auto_hide_render_an_empty_list() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let mut widget = menu(MenuOptions {
            auto_hide_container: false,
            ..options(&container)
        })
        .expect("menu");
        let harness = Harness::for_widget(&widget);

        harness.render(&mut widget, &ResultsSnapshot::default());
        let view = mounted(&container);
        let props = list(&view);
        assert!(props.facet_values.is_empty());
        assert!(props.should_auto_hide_container);
    }

    #[test]
    fn toggling_the_refined_value_clears_it_with_one_search() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let mut widget = menu(options(&container)).expect("menu");
        let harness = Harness::for_widget(&widget);
        harness.helper.toggle_refinement("brand", "x");

        harness.render(&mut widget, &harness.results(ResultsSnapshot {
            hierarchical_facets: vec![FacetResult::new("brand").with_value("x", 4).with_value("y", 2)],
            ..ResultsSnapshot::default()
        }));
        let view = mounted(&container);
        let props = list(&view);
        assert!(props.facet_values[0].is_refined);

        props.toggle_refinement.call("x".to_string());

        assert!(harness.helper.state().hierarchical_refinements().is_empty());
        assert_eq!(harness.helper.search_requests(), 1);
    }

    #[test]
    fn toggling_another_value_replaces_the_selection() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let mut widget = menu(options(&container)).expect("menu");
        let harness = Harness::for_widget(&widget);
        harness.helper.toggle_refinement("brand", "x");

        harness.render(&mut widget, &brand_results(&harness));
        list(&mounted(&container)).toggle_refinement.call("a".to_string());

        let state = harness.helper.state();
        assert_eq!(state.hierarchical_refinements().get("brand"), Some(&vec!["a".to_string()]));
        assert_eq!(harness.helper.search_requests(), 1);
    }

    #[test]
    fn show_more_templates_are_exposed_with_prefixed_keys() {
        let container = Arc::new(MemoryContainer::new("#brands"));
        let mut widget = menu(MenuOptions {
            show_more: ShowMore::Enabled,
            ..options(&container)
        })
        .expect("menu");
        let harness = Harness::for_widget(&widget);

        harness.render(&mut widget, &brand_results(&harness));
        let view = mounted(&container);
        let props = list(&view);
        assert!(props.show_more);
        assert_eq!(props.limit_max, show_more::DEFAULT_SHOW_MORE_LIMIT);
        assert_eq!(
            props.template_props.render("show-more-inactive", &json!({})).as_deref(),
            Some("Show more")
        );
    }
}
