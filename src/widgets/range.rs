//! Numeric range refinements with open bounds.

use facetkit_widget_api::{FacetStats, NumericOperator, QueryState, SearchHelper};
use log::debug;
use serde::Serialize;

/// Numeric bounds; an open side is `-inf` or `+inf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
}

impl RangeBounds {
    pub const UNBOUNDED: RangeBounds = RangeBounds {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bounds of the statistics the user saw; missing statistics leave both
    /// sides open so that any handle position counts as a refinement.
    pub fn from_stats(stats: Option<FacetStats>) -> Self {
        stats.map_or(Self::UNBOUNDED, |stats| Self::new(stats.min, stats.max))
    }
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Current `>=` / `<=` refinement on `attribute`.
///
/// When several values exist for one operator only the first is considered.
pub fn current_refinement(state: &QueryState, attribute: &str) -> RangeBounds {
    let first = |operator| {
        state
            .numeric_refinement(attribute, operator)
            .and_then(|values| values.first().copied())
    };

    RangeBounds {
        min: first(NumericOperator::GreaterOrEqual).unwrap_or(f64::NEG_INFINITY),
        max: first(NumericOperator::LessOrEqual).unwrap_or(f64::INFINITY),
    }
}

/// Replace the refinement on `attribute` with `new_values` and search.
///
/// A side is only refined when it moved inside the previous statistics: a
/// handle dragged back to the edge of the data removes that side's refinement.
pub fn apply(previous_stats: RangeBounds, helper: &dyn SearchHelper, attribute: &str, new_values: [f64; 2]) {
    let [lower, upper] = new_values;
    helper.clear_refinements(attribute);
    if lower > previous_stats.min {
        helper.add_numeric_refinement(attribute, NumericOperator::GreaterOrEqual, lower.round());
    }
    if upper < previous_stats.max {
        helper.add_numeric_refinement(attribute, NumericOperator::LessOrEqual, upper.round());
    }
    debug!("range refine on '{attribute}': [{lower}, {upper}] against {previous_stats:?}");
    helper.search();
}
