use facetkit_widget_api::{FacetResult, FacetStats, QueryState, ResultsSnapshot};
use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::utils::format_number;

/// Facet values returned when no widget bounded them.
pub const DEFAULT_MAX_VALUES_PER_FACET: usize = 10;

pub type Record = Map<String, Value>;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("records are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("records must be an array of objects: {reason}")]
    InvalidRecords { reason: String },
}

/// Executes a query state and returns the aggregated results.
pub trait SearchBackend: Send + Sync {
    fn search(&self, state: &QueryState) -> Result<ResultsSnapshot, BackendError>;
}

/// Backend answering every index from the same in-memory records.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Vec<Record>,
}

impl MemoryBackend {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of objects.
    pub fn from_json(text: &str) -> Result<Self, BackendError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn from_value(value: Value) -> Result<Self, BackendError> {
        let Value::Array(items) = value else {
            return Err(BackendError::InvalidRecords {
                reason: format!("expected an array, found {}", kind(&value)),
            });
        };
        let records = items
            .into_iter()
            .enumerate()
            .map(|(position, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(BackendError::InvalidRecords {
                    reason: format!("record {position} is {}", kind(&other)),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching<'a>(&'a self, filter: &'a Filter<'_>) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |record| filter.matches(record))
    }
}

impl SearchBackend for MemoryBackend {
    fn search(&self, state: &QueryState) -> Result<ResultsSnapshot, BackendError> {
        let configuration = state.configuration();
        let limit = configuration
            .max_values_per_facet
            .unwrap_or(DEFAULT_MAX_VALUES_PER_FACET);

        let filter = Filter::new(state, None);
        let hits: Vec<&Record> = self.matching(&filter).collect();

        let hierarchical_facets = configuration
            .hierarchical_facets
            .iter()
            .map(|(name, attributes)| {
                let attribute = attributes.first().map_or(name.as_str(), String::as_str);
                let filter = Filter::new(state, Some(name.as_str()));
                aggregate(name, attribute, self.matching(&filter), limit)
            })
            .collect();
        let facets = configuration
            .facets
            .iter()
            .map(|attribute| aggregate(attribute, attribute, hits.iter().copied(), limit))
            .collect();
        let disjunctive_facets = configuration
            .disjunctive_facets
            .iter()
            .map(|attribute| {
                let filter = Filter::new(state, Some(attribute));
                aggregate(attribute, attribute, self.matching(&filter), limit)
            })
            .collect();

        debug!(
            "memory search on '{}' matched {} of {} records",
            state.index(),
            hits.len(),
            self.records.len()
        );

        Ok(ResultsSnapshot {
            nb_hits: hits.len(),
            hierarchical_facets,
            disjunctive_facets,
            facets,
            state: state.clone(),
        })
    }
}

/// Record filter derived from a query state.
///
/// When `excluded` names a disjunctive or hierarchical facet, that facet's own
/// discrete and numeric refinements are ignored so its sibling values stay
/// selectable.
struct Filter<'a> {
    state: &'a QueryState,
    query: String,
    excluded: Option<&'a str>,
}

impl<'a> Filter<'a> {
    fn new(state: &'a QueryState, excluded: Option<&'a str>) -> Self {
        Self {
            state,
            query: state.query().trim().to_lowercase(),
            excluded,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        self.matches_query(record)
            && self.matches_numeric(record)
            && self.state.facet_refinements().iter().all(|(attribute, values)| {
                values.iter().all(|value| field_values(record, attribute).contains(value))
            })
            && self
                .state
                .hierarchical_refinements()
                .iter()
                .filter(|(facet, _)| Some(facet.as_str()) != self.excluded)
                .all(|(facet, values)| {
                    let attribute = self
                        .state
                        .configuration()
                        .hierarchical_facets
                        .get(facet)
                        .and_then(|attributes| attributes.first())
                        .map_or(facet.as_str(), String::as_str);
                    let present = field_values(record, attribute);
                    values.iter().all(|value| present.contains(value))
                })
            && self
                .state
                .disjunctive_refinements()
                .iter()
                .filter(|(attribute, _)| Some(attribute.as_str()) != self.excluded)
                .all(|(attribute, values)| {
                    let present = field_values(record, attribute);
                    values.is_empty() || values.iter().any(|value| present.contains(value))
                })
    }

    fn matches_query(&self, record: &Record) -> bool {
        self.query.is_empty()
            || record
                .values()
                .any(|value| contains_text(value, &self.query))
    }

    fn matches_numeric(&self, record: &Record) -> bool {
        self.state
            .numeric_refinements()
            .iter()
            .filter(|(attribute, _)| Some(attribute.as_str()) != self.excluded)
            .all(|(attribute, by_operator)| {
                let numbers = numeric_values(record, attribute);
                by_operator.iter().all(|(operator, operands)| {
                    operands
                        .iter()
                        .all(|operand| numbers.iter().any(|number| operator.matches(*number, *operand)))
                })
            })
    }
}

fn aggregate<'r>(
    name: &str,
    attribute: &str,
    records: impl Iterator<Item = &'r Record>,
    limit: usize,
) -> FacetResult {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    let mut numbers = Vec::new();
    for record in records {
        for value in field_values(record, attribute) {
            *counts.entry(value).or_default() += 1;
        }
        numbers.extend(numeric_values(record, attribute));
    }

    // Stable, so equal counts keep their first-seen order.
    counts.sort_by(|_, left, _, right| right.cmp(left));
    counts.truncate(limit);

    FacetResult {
        name: name.to_string(),
        data: counts,
        exhaustive: true,
        stats: stats(&numbers),
    }
}

fn stats(numbers: &[f64]) -> Option<FacetStats> {
    if numbers.is_empty() {
        return None;
    }
    let sum: f64 = numbers.iter().sum();
    Some(FacetStats {
        min: numbers.iter().copied().fold(f64::INFINITY, f64::min),
        max: numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg: sum / numbers.len() as f64,
        sum,
    })
}

fn field<'r>(record: &'r Record, attribute: &str) -> Option<&'r Value> {
    let mut segments = attribute.split('.');
    let first = record.get(segments.next()?)?;
    segments.try_fold(first, |value, segment| value.get(segment))
}

/// Facet values of a field; arrays contribute each element.
fn field_values(record: &Record, attribute: &str) -> Vec<String> {
    match field(record, attribute) {
        Some(Value::Array(items)) => items.iter().filter_map(facet_value).collect(),
        Some(value) => facet_value(value).into_iter().collect(),
        None => Vec::new(),
    }
}

fn facet_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => number.as_f64().map(format_number),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn numeric_values(record: &Record, attribute: &str) -> Vec<f64> {
    match field(record, attribute) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_f64).collect(),
        Some(value) => value.as_f64().into_iter().collect(),
        None => Vec::new(),
    }
}

fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(text) => text.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|item| contains_text(item, needle)),
        Value::Object(map) => map.values().any(|item| contains_text(item, needle)),
        _ => false,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
