use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::configuration::SearchConfiguration;

/// Comparison operator used by numeric refinements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumericOperator {
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "=")]
    Equal,
}

impl NumericOperator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            NumericOperator::GreaterOrEqual => ">=",
            NumericOperator::LessOrEqual => "<=",
            NumericOperator::Greater => ">",
            NumericOperator::Less => "<",
            NumericOperator::Equal => "=",
        }
    }

    /// Evaluate `value <op> operand`.
    #[must_use]
    pub fn matches(self, value: f64, operand: f64) -> bool {
        match self {
            NumericOperator::GreaterOrEqual => value >= operand,
            NumericOperator::LessOrEqual => value <= operand,
            NumericOperator::Greater => value > operand,
            NumericOperator::Less => value < operand,
            NumericOperator::Equal => value == operand,
        }
    }
}

impl fmt::Display for NumericOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Numeric refinements of a single attribute, keyed by operator.
pub type NumericRefinements = BTreeMap<NumericOperator, Vec<f64>>;

/// All refinements active for a search session.
///
/// The session owns the canonical instance; widgets receive read-only snapshots
/// and mutate it through a [`SearchHelper`](crate::SearchHelper). The consuming
/// builders (`toggled_refinement`, `cleared_refinements`, ...) produce candidate
/// states, typically handed to a URL builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    index: String,
    query: String,
    configuration: SearchConfiguration,
    facet_refinements: BTreeMap<String, Vec<String>>,
    disjunctive_refinements: BTreeMap<String, Vec<String>>,
    hierarchical_refinements: BTreeMap<String, Vec<String>>,
    numeric_refinements: BTreeMap<String, NumericRefinements>,
}

impl QueryState {
    /// Seed a new state for `index` from the merged widget configuration.
    pub fn new(index: impl Into<String>, configuration: SearchConfiguration) -> Self {
        Self {
            index: index.into(),
            configuration,
            ..Self::default()
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn configuration(&self) -> &SearchConfiguration {
        &self.configuration
    }

    pub fn set_index(&mut self, index: impl Into<String>) {
        self.index = index.into();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn facet_refinements(&self) -> &BTreeMap<String, Vec<String>> {
        &self.facet_refinements
    }

    pub fn disjunctive_refinements(&self) -> &BTreeMap<String, Vec<String>> {
        &self.disjunctive_refinements
    }

    pub fn hierarchical_refinements(&self) -> &BTreeMap<String, Vec<String>> {
        &self.hierarchical_refinements
    }

    pub fn numeric_refinements(&self) -> &BTreeMap<String, NumericRefinements> {
        &self.numeric_refinements
    }

    /// Values refined on `attribute` with `operator`, in insertion order.
    pub fn numeric_refinement(&self, attribute: &str, operator: NumericOperator) -> Option<&[f64]> {
        self.numeric_refinements
            .get(attribute)
            .and_then(|by_operator| by_operator.get(&operator))
            .map(Vec::as_slice)
    }

    pub fn is_numeric_refined(&self, attribute: &str, operator: NumericOperator, value: f64) -> bool {
        self.numeric_refinement(attribute, operator)
            .is_some_and(|values| values.contains(&value))
    }

    /// Returns `true` when `value` is refined on `facet`, whatever its facet kind.
    pub fn is_refined(&self, facet: &str, value: &str) -> bool {
        self.refinements_for(facet)
            .is_some_and(|values| values.iter().any(|refined| refined == value))
    }

    /// Returns `true` when any refinement, discrete or numeric, targets `attribute`.
    pub fn has_refinements(&self, attribute: &str) -> bool {
        self.refinements_for(attribute)
            .is_some_and(|values| !values.is_empty())
            || self
                .numeric_refinements
                .get(attribute)
                .is_some_and(|by_operator| by_operator.values().any(|values| !values.is_empty()))
    }

    fn refinements_for(&self, facet: &str) -> Option<&Vec<String>> {
        if self.configuration.is_hierarchical(facet) {
            self.hierarchical_refinements.get(facet)
        } else if self.configuration.is_disjunctive(facet) {
            self.disjunctive_refinements.get(facet)
        } else {
            self.facet_refinements.get(facet)
        }
    }

    /// Toggle `value` on `facet`.
    ///
    /// Hierarchical facets hold a single selected path: toggling the selected
    /// value clears it and toggling another value replaces it. Conjunctive and
    /// disjunctive facets add or remove `value` from their value list.
    pub fn toggle_refinement(&mut self, facet: &str, value: &str) {
        if self.configuration.is_hierarchical(facet) {
            let current = self.hierarchical_refinements.remove(facet);
            let was_selected = current.is_some_and(|values| values.first().is_some_and(|v| v == value));
            if !was_selected {
                self.hierarchical_refinements
                    .insert(facet.to_string(), vec![value.to_string()]);
            }
            return;
        }

        let refinements = if self.configuration.is_disjunctive(facet) {
            &mut self.disjunctive_refinements
        } else {
            &mut self.facet_refinements
        };
        let values = refinements.entry(facet.to_string()).or_default();
        if let Some(position) = values.iter().position(|refined| refined == value) {
            values.remove(position);
        } else {
            values.push(value.to_string());
        }
        if values.is_empty() {
            refinements.remove(facet);
        }
    }

    /// Remove every refinement targeting `attribute`.
    pub fn clear_refinements(&mut self, attribute: &str) {
        self.facet_refinements.remove(attribute);
        self.disjunctive_refinements.remove(attribute);
        self.hierarchical_refinements.remove(attribute);
        self.numeric_refinements.remove(attribute);
    }

    /// Add a numeric refinement; refining the same value twice is a no-op.
    pub fn add_numeric_refinement(&mut self, attribute: &str, operator: NumericOperator, value: f64) {
        let values = self
            .numeric_refinements
            .entry(attribute.to_string())
            .or_default()
            .entry(operator)
            .or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }

    /// Candidate state with `value` toggled on `facet`.
    #[must_use]
    pub fn toggled_refinement(&self, facet: &str, value: &str) -> Self {
        let mut state = self.clone();
        state.toggle_refinement(facet, value);
        state
    }

    /// Candidate state without any refinement on `attribute`.
    #[must_use]
    pub fn cleared_refinements(&self, attribute: &str) -> Self {
        let mut state = self.clone();
        state.clear_refinements(attribute);
        state
    }

    /// Candidate state with an additional numeric refinement.
    #[must_use]
    pub fn with_numeric_refinement(mut self, attribute: &str, operator: NumericOperator, value: f64) -> Self {
        self.add_numeric_refinement(attribute, operator, value);
        self
    }

    /// Candidate state targeting another index.
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.set_index(index);
        self
    }
}
