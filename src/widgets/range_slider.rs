//! Two-handle slider over a numeric attribute.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use facetkit_widget_api::{
    ConfigurationError, InitContext, RenderContext, SearchConfiguration, SharedHelper, Template, Templates,
    Widget,
};
use log::debug;
use serde::Serialize;

use super::range::{self, RangeBounds};
use crate::render::{
    Callback, Container, TemplateProps, View, ViewFactory, ViewProps, auto_hide_container, header_footer,
    prepare_template_props, view_factory,
};

const USAGE: &str = "Usage:
range_slider(RangeSliderOptions {
  container,
  attribute_name,
  [tooltips=true],
  [templates.{header, footer}],
  [step=1],
  [pips=true],
  [auto_hide_container=true]
})";

fn default_templates() -> Templates {
    Templates::from([
        ("header".to_string(), Template::from("")),
        ("footer".to_string(), Template::from("")),
    ])
}

/// Formats a handle value for its tooltip.
pub type TooltipFormat = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Tooltip behaviour of the slider handles.
#[derive(Clone, Default)]
pub enum Tooltips {
    /// Show the raw value.
    #[default]
    Shown,
    Hidden,
    /// Show the value through a formatter.
    Format(TooltipFormat),
}

impl Tooltips {
    pub fn is_shown(&self) -> bool {
        !matches!(self, Tooltips::Hidden)
    }

    /// Tooltip text for `value`, `None` when tooltips are hidden.
    pub fn format(&self, value: f64) -> Option<String> {
        match self {
            Tooltips::Shown => Some(crate::utils::format_number(value)),
            Tooltips::Hidden => None,
            Tooltips::Format(format) => Some(format(value)),
        }
    }
}

impl From<bool> for Tooltips {
    fn from(shown: bool) -> Self {
        if shown { Tooltips::Shown } else { Tooltips::Hidden }
    }
}

impl fmt::Debug for Tooltips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tooltips::Shown => f.write_str("Shown"),
            Tooltips::Hidden => f.write_str("Hidden"),
            Tooltips::Format(_) => f.write_str("Format(..)"),
        }
    }
}

#[derive(Clone)]
pub struct RangeSliderOptions {
    pub container: Option<Arc<dyn Container>>,
    pub attribute_name: String,
    pub tooltips: Tooltips,
    pub templates: Templates,
    pub step: f64,
    pub pips: bool,
    pub auto_hide_container: bool,
}

impl Default for RangeSliderOptions {
    fn default() -> Self {
        Self {
            container: None,
            attribute_name: String::new(),
            tooltips: Tooltips::Shown,
            templates: Templates::new(),
            step: 1.0,
            pips: true,
            auto_hide_container: true,
        }
    }
}

/// Slider extent; sides are `None` when the backend returned no statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SliderProps {
    pub range: SliderRange,
    /// Handle positions; open sides serialize as `null`.
    pub start: [f64; 2],
    pub step: f64,
    pub pips: bool,
    pub tooltips: bool,
    pub should_auto_hide_container: bool,
    #[serde(skip)]
    pub tooltip_format: Tooltips,
    #[serde(skip)]
    pub template_props: TemplateProps,
    #[serde(skip)]
    pub on_change: Callback<[f64; 2]>,
}

impl ViewProps for SliderProps {
    fn should_auto_hide_container(&self) -> bool {
        self.should_auto_hide_container
    }

    fn template_props(&self) -> &TemplateProps {
        &self.template_props
    }
}

pub struct RangeSlider {
    container: Arc<dyn Container>,
    attribute_name: String,
    tooltips: Tooltips,
    templates: Templates,
    step: f64,
    pips: bool,
    view: ViewFactory<SliderProps>,
    previous_stats: Arc<Mutex<RangeBounds>>,
    refine: Option<Callback<[f64; 2]>>,
    template_props: Option<TemplateProps>,
}

pub fn range_slider(options: RangeSliderOptions) -> Result<RangeSlider, ConfigurationError> {
    let RangeSliderOptions {
        container,
        attribute_name,
        tooltips,
        templates,
        step,
        pips,
        auto_hide_container: auto_hide,
    } = options;

    let container = container.ok_or_else(|| ConfigurationError::usage("range_slider", "container", USAGE))?;
    if attribute_name.is_empty() {
        return Err(ConfigurationError::usage("range_slider", "attribute_name", USAGE));
    }
    if !(step.is_finite() && step > 0.0) {
        return Err(ConfigurationError::invalid_option(
            "range_slider",
            "step",
            format!("must be a positive number, got {step}"),
        ));
    }

    let mut view = header_footer(view_factory(View::Slider));
    if auto_hide {
        view = auto_hide_container(view);
    }

    Ok(RangeSlider {
        container,
        attribute_name,
        tooltips,
        templates,
        step,
        pips,
        view,
        previous_stats: Arc::new(Mutex::new(RangeBounds::UNBOUNDED)),
        refine: None,
        template_props: None,
    })
}

impl RangeSlider {
    /// Statistics seen by the last render.
    pub fn previous_stats(&self) -> RangeBounds {
        *lock(&self.previous_stats)
    }

    fn bind_refine(&mut self, helper: &SharedHelper) -> Callback<[f64; 2]> {
        let helper = Arc::clone(helper);
        let attribute = self.attribute_name.clone();
        let previous_stats = Arc::clone(&self.previous_stats);
        let refine = Callback::new(move |values: [f64; 2]| {
            let stats = *lock(&previous_stats);
            range::apply(stats, helper.as_ref(), &attribute, values);
        });
        self.refine = Some(refine.clone());
        refine
    }
}

fn lock(stats: &Mutex<RangeBounds>) -> MutexGuard<'_, RangeBounds> {
    stats.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Widget for RangeSlider {
    fn name(&self) -> &'static str {
        "range_slider"
    }

    fn get_configuration(&self, _seed: &SearchConfiguration) -> SearchConfiguration {
        SearchConfiguration::default().with_disjunctive_facet(self.attribute_name.clone())
    }

    fn init(&mut self, context: InitContext<'_>) -> Result<(), ConfigurationError> {
        self.bind_refine(context.helper);
        self.template_props = Some(prepare_template_props(
            None,
            &default_templates(),
            context.templates_config,
            &self.templates,
        ));
        Ok(())
    }

    fn render(&mut self, context: RenderContext<'_>) {
        let stats = context
            .results
            .disjunctive_facet(&self.attribute_name)
            .and_then(|facet| facet.stats);
        let current = range::current_refinement(context.state, &self.attribute_name);

        *lock(&self.previous_stats) = RangeBounds::from_stats(stats);

        let on_change = match &self.refine {
            Some(refine) => refine.clone(),
            None => self.bind_refine(context.helper),
        };
        let template_props = self.template_props.clone().unwrap_or_else(|| {
            prepare_template_props(None, &default_templates(), context.templates_config, &self.templates)
        });

        let range = SliderRange {
            min: stats.map(|stats| stats.min.floor()),
            max: stats.map(|stats| stats.max.ceil()),
        };
        let should_auto_hide_container = stats.is_none_or(|stats| stats.min == stats.max);
        debug!(
            "range slider '{}' rendering range {range:?} from [{}, {}]",
            self.attribute_name, current.min, current.max
        );

        let props = SliderProps {
            range,
            start: [current.min, current.max],
            step: self.step,
            pips: self.pips,
            tooltips: self.tooltips.is_shown(),
            should_auto_hide_container,
            tooltip_format: self.tooltips.clone(),
            template_props,
            on_change,
        };
        self.container.mount((self.view)(props));
    }
}
