use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::state::QueryState;

/// Numeric statistics computed by the backend over a facet's result set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacetStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub sum: f64,
}

/// Aggregated counts for a single facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetResult {
    pub name: String,
    /// Value counts in the order the backend aggregated them.
    pub data: IndexMap<String, u64>,
    /// `false` when the counts were approximated by the backend.
    pub exhaustive: bool,
    pub stats: Option<FacetStats>,
}

impl FacetResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: IndexMap::new(),
            exhaustive: true,
            stats: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>, count: u64) -> Self {
        self.data.insert(value.into(), count);
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: FacetStats) -> Self {
        self.stats = Some(stats);
        self
    }
}

impl Default for FacetResult {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// How a facet was requested, and therefore how its refinements are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Hierarchical,
    Disjunctive,
    Conjunctive,
}

/// Immutable response of a single search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsSnapshot {
    pub nb_hits: usize,
    pub hierarchical_facets: Vec<FacetResult>,
    pub disjunctive_facets: Vec<FacetResult>,
    pub facets: Vec<FacetResult>,
    /// State the search was executed with.
    pub state: QueryState,
}

impl ResultsSnapshot {
    /// Snapshot used before any search completed.
    pub fn empty(state: QueryState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Locate a facet by name, preferring hierarchical over disjunctive over
    /// conjunctive declarations.
    pub fn facet(&self, name: &str) -> Option<(FacetKind, &FacetResult)> {
        find(&self.hierarchical_facets, name)
            .map(|facet| (FacetKind::Hierarchical, facet))
            .or_else(|| find(&self.disjunctive_facets, name).map(|facet| (FacetKind::Disjunctive, facet)))
            .or_else(|| find(&self.facets, name).map(|facet| (FacetKind::Conjunctive, facet)))
    }

    pub fn disjunctive_facet(&self, name: &str) -> Option<&FacetResult> {
        find(&self.disjunctive_facets, name)
    }

    /// Statistics of `name`, whichever facet list carries them.
    pub fn facet_stats(&self, name: &str) -> Option<FacetStats> {
        self.facet(name).and_then(|(_, facet)| facet.stats)
    }
}

fn find<'a>(facets: &'a [FacetResult], name: &str) -> Option<&'a FacetResult> {
    facets.iter().find(|facet| facet.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_lookup_reports_the_declaring_list() {
        let results = ResultsSnapshot {
            hierarchical_facets: vec![FacetResult::new("brand")],
            disjunctive_facets: vec![FacetResult::new("price")],
            facets: vec![FacetResult::new("type")],
            ..ResultsSnapshot::default()
        };

        assert_eq!(results.facet("brand").map(|(kind, _)| kind), Some(FacetKind::Hierarchical));
        assert_eq!(results.facet("price").map(|(kind, _)| kind), Some(FacetKind::Disjunctive));
        assert_eq!(results.facet("type").map(|(kind, _)| kind), Some(FacetKind::Conjunctive));
        assert!(results.facet("missing").is_none());
    }

    #[test]
    fn snapshot_deserializes_with_defaults() {
        let results: ResultsSnapshot = serde_json::from_str(
            r#"{"nb_hits": 3, "disjunctive_facets": [{"name": "price", "data": {"10": 1}, "stats": {"min": 10, "max": 30, "avg": 20, "sum": 60}}]}"#,
        )
        .expect("deserialize");

        assert_eq!(results.nb_hits, 3);
        let stats = results.facet_stats("price").expect("stats");
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert!(results.hierarchical_facets.is_empty());
    }
}
