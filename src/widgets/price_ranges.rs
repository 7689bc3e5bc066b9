//! Price buckets generated from the statistics of a numeric facet.

use std::sync::Arc;

use facetkit_widget_api::{
    ConfigurationError, FacetStats, NumericOperator, QueryState, RenderContext, SearchConfiguration,
    SearchHelper, Template, Templates, Widget,
};
use log::debug;
use serde::Serialize;

use crate::render::{
    Callback, Container, TemplateProps, View, ViewFactory, ViewProps, auto_hide_container, header_footer,
    prepare_template_props, view_factory,
};
use crate::utils::format_number;

const USAGE: &str = "Usage:
price_ranges(PriceRangesOptions {
  container,
  attribute_name,
  [currency=$],
  [labels.{separator, button}],
  [templates.{header, item, footer}],
  [auto_hide_container=true]
})";

fn default_templates() -> Templates {
    Templates::from([
        ("header".to_string(), Template::from("")),
        ("item".to_string(), Template::from("{{label}}")),
        ("footer".to_string(), Template::from("")),
    ])
}

/// Texts of the custom range form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRangesLabels {
    pub separator: String,
    pub button: String,
}

impl Default for PriceRangesLabels {
    fn default() -> Self {
        Self {
            separator: "to".into(),
            button: "Go".into(),
        }
    }
}

#[derive(Clone)]
pub struct PriceRangesOptions {
    pub container: Option<Arc<dyn Container>>,
    pub attribute_name: String,
    pub currency: String,
    pub labels: PriceRangesLabels,
    pub templates: Templates,
    pub auto_hide_container: bool,
}

impl Default for PriceRangesOptions {
    fn default() -> Self {
        Self {
            container: None,
            attribute_name: String::new(),
            currency: "$".into(),
            labels: PriceRangesLabels::default(),
            templates: Templates::new(),
            auto_hide_container: true,
        }
    }
}

/// A bucket with open sides left as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bucket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
}

impl Bucket {
    pub fn new(from: Option<f64>, to: Option<f64>) -> Self {
        Self { from, to }
    }

    fn label(&self, currency: &str) -> String {
        match (self.from, self.to) {
            (Some(from), Some(to)) => format!(
                "{currency}{} - {currency}{}",
                format_number(from),
                format_number(to)
            ),
            (None, Some(to)) => format!("≤ {currency}{}", format_number(to)),
            (Some(from), None) => format!("≥ {currency}{}", format_number(from)),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceRange {
    #[serde(flatten)]
    pub bucket: Bucket,
    pub label: String,
    pub is_refined: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceRangesProps {
    pub facet_values: Vec<PriceRange>,
    pub currency: String,
    pub labels: PriceRangesLabels,
    pub should_auto_hide_container: bool,
    #[serde(skip)]
    pub template_props: TemplateProps,
    #[serde(skip)]
    pub refine: Callback<Bucket>,
}

impl ViewProps for PriceRangesProps {
    fn should_auto_hide_container(&self) -> bool {
        self.should_auto_hide_container
    }

    fn template_props(&self) -> &TemplateProps {
        &self.template_props
    }
}

pub struct PriceRanges {
    container: Arc<dyn Container>,
    attribute_name: String,
    currency: String,
    labels: PriceRangesLabels,
    templates: Templates,
    view: ViewFactory<PriceRangesProps>,
}

pub fn price_ranges(options: PriceRangesOptions) -> Result<PriceRanges, ConfigurationError> {
    let PriceRangesOptions {
        container,
        attribute_name,
        currency,
        labels,
        templates,
        auto_hide_container: auto_hide,
    } = options;

    let container = container.ok_or_else(|| ConfigurationError::usage("price_ranges", "container", USAGE))?;
    if attribute_name.is_empty() {
        return Err(ConfigurationError::usage("price_ranges", "attribute_name", USAGE));
    }

    let mut view = header_footer(view_factory(View::PriceRanges));
    if auto_hide {
        view = auto_hide_container(view);
    }

    Ok(PriceRanges {
        container,
        attribute_name,
        currency,
        labels,
        templates,
        view,
    })
}

/// Round to `precision`, never below 1.
fn round(value: f64, precision: f64) -> f64 {
    let rounded = (value / precision).round() * precision;
    if rounded < 1.0 { 1.0 } else { rounded }
}

/// Split the span of `stats` into buckets around the average.
///
/// The first bucket is open below and the last open above, except when the
/// data only supports a single bucket, which then spans `[min, max]`.
pub fn generate_ranges(stats: &FacetStats) -> Vec<Bucket> {
    let precision = if stats.avg < 100.0 {
        1.0
    } else if stats.avg < 1000.0 {
        10.0
    } else {
        100.0
    };
    let avg = round(stats.avg.round(), precision);
    let min = stats.min.ceil();
    let mut max = round(stats.max.floor(), precision);
    if max > stats.max {
        max = (stats.max.floor() / precision).floor() * precision;
    }

    if min == max {
        return Vec::new();
    }

    let mut buckets = vec![Bucket::new(None, Some(min))];
    let mut next = min;
    while next < avg {
        let Some(to) = push_step(&mut buckets, next, (avg - min) / 3.0, precision) else {
            break;
        };
        next = to;
    }
    while next < max {
        let Some(to) = push_step(&mut buckets, next, (max - avg) / 3.0, precision) else {
            break;
        };
        next = to;
    }

    if buckets.len() == 1 && next != avg {
        buckets.push(Bucket::new(Some(next), Some(avg)));
    }
    if buckets.len() == 1 {
        // Rounded the way stored refinements are.
        buckets[0] = Bucket::new(Some(stats.min.floor()), Some(stats.max.ceil()));
    } else if let Some(last) = buckets.last_mut() {
        last.to = None;
    }
    buckets
}

// Append the bucket starting where the previous one ends; returns its upper
// bound, or `None` when `from` is too large for a step of `precision` to move it.
fn push_step(buckets: &mut Vec<Bucket>, from: f64, width: f64, precision: f64) -> Option<f64> {
    let mut to = round(from + width, precision);
    if to <= from {
        to = from + precision;
    }
    if to <= from {
        return None;
    }
    buckets.push(Bucket::new(Some(from), Some(to)));
    Some(to)
}

/// The range currently refined on `attribute`, if any.
fn refined_range(state: &QueryState, attribute: &str) -> Option<Bucket> {
    let first = |operators: [NumericOperator; 2]| {
        operators.into_iter().find_map(|operator| {
            state
                .numeric_refinement(attribute, operator)
                .and_then(|values| values.first().copied())
        })
    };
    let from = first([NumericOperator::GreaterOrEqual, NumericOperator::Greater]).map(f64::floor);
    let to = first([NumericOperator::LessOrEqual, NumericOperator::Less]).map(f64::ceil);
    (from.is_some() || to.is_some()).then_some(Bucket::new(from, to))
}

/// Apply a bucket refinement to `state`: the refined bucket is removed,
/// anything else replaces the current refinement.
fn refine_state(state: &mut QueryState, attribute: &str, bucket: Bucket) {
    let refined = refined_range(state, attribute);
    state.clear_refinements(attribute);
    if refined != Some(bucket) {
        if let Some(from) = bucket.from {
            state.add_numeric_refinement(attribute, NumericOperator::GreaterOrEqual, from.floor());
        }
        if let Some(to) = bucket.to {
            state.add_numeric_refinement(attribute, NumericOperator::LessOrEqual, to.ceil());
        }
    }
}

fn refine(helper: &dyn SearchHelper, attribute: &str, bucket: Bucket) {
    let refined = refined_range(&helper.state(), attribute);
    helper.clear_refinements(attribute);
    if refined != Some(bucket) {
        if let Some(from) = bucket.from {
            helper.add_numeric_refinement(attribute, NumericOperator::GreaterOrEqual, from.floor());
        }
        if let Some(to) = bucket.to {
            helper.add_numeric_refinement(attribute, NumericOperator::LessOrEqual, to.ceil());
        }
    }
    helper.search();
}

impl Widget for PriceRanges {
    fn name(&self) -> &'static str {
        "price_ranges"
    }

    fn get_configuration(&self, _seed: &SearchConfiguration) -> SearchConfiguration {
        SearchConfiguration::default().with_facet(self.attribute_name.clone())
    }

    fn render(&mut self, context: RenderContext<'_>) {
        let refined = refined_range(context.state, &self.attribute_name);
        let mut buckets = match context.results.facet_stats(&self.attribute_name) {
            Some(stats) if context.results.nb_hits > 0 => generate_ranges(&stats),
            _ => Vec::new(),
        };
        if let Some(refined) = refined
            && context.results.nb_hits > 0
            && !buckets.contains(&refined)
        {
            buckets.insert(0, refined);
        }

        let facet_values = buckets
            .into_iter()
            .map(|bucket| {
                let mut candidate = context.state.clone();
                refine_state(&mut candidate, &self.attribute_name, bucket);
                PriceRange {
                    label: bucket.label(&self.currency),
                    is_refined: refined == Some(bucket),
                    url: (context.create_url)(&candidate),
                    bucket,
                }
            })
            .collect::<Vec<_>>();
        debug!(
            "price ranges '{}' rendering {} buckets",
            self.attribute_name,
            facet_values.len()
        );

        let helper = Arc::clone(context.helper);
        let attribute = self.attribute_name.clone();
        let props = PriceRangesProps {
            should_auto_hide_container: facet_values.is_empty(),
            facet_values,
            currency: self.currency.clone(),
            labels: self.labels.clone(),
            template_props: prepare_template_props(
                None,
                &default_templates(),
                context.templates_config,
                &self.templates,
            ),
            refine: Callback::new(move |bucket: Bucket| refine(helper.as_ref(), &attribute, bucket)),
        };
        self.container.mount((self.view)(props));
    }
}
