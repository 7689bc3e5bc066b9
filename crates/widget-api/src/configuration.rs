use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Partial search configuration contributed by a widget before the first search.
///
/// Every collection is a set keyed by facet name so that merging contributions is
/// commutative: the order in which widgets are registered never changes the
/// effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfiguration {
    /// Hierarchical facets keyed by name, mapped to their level attributes.
    pub hierarchical_facets: BTreeMap<String, Vec<String>>,
    /// Facets refined with OR semantics across their own values.
    pub disjunctive_facets: BTreeSet<String>,
    /// Facets refined with AND semantics.
    pub facets: BTreeSet<String>,
    /// Upper bound of facet values the backend should return per facet.
    pub max_values_per_facet: Option<usize>,
}

impl SearchConfiguration {
    /// Declare a single-level hierarchical facet named after `attribute`.
    #[must_use]
    pub fn with_hierarchical_facet(mut self, attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        self.hierarchical_facets
            .insert(attribute.clone(), vec![attribute]);
        self
    }

    #[must_use]
    pub fn with_disjunctive_facet(mut self, attribute: impl Into<String>) -> Self {
        self.disjunctive_facets.insert(attribute.into());
        self
    }

    #[must_use]
    pub fn with_facet(mut self, attribute: impl Into<String>) -> Self {
        self.facets.insert(attribute.into());
        self
    }

    #[must_use]
    pub fn with_max_values_per_facet(mut self, bound: usize) -> Self {
        self.max_values_per_facet = Some(bound);
        self
    }

    /// Merge another contribution into this configuration.
    ///
    /// Facet declarations are unioned and the value bound only ever grows. A
    /// hierarchical facet declared twice keeps the attribute list that sorts
    /// first, which keeps the merge independent of registration order.
    pub fn merge(&mut self, other: SearchConfiguration) {
        for (name, attributes) in other.hierarchical_facets {
            match self.hierarchical_facets.get_mut(&name) {
                Some(existing) if *existing <= attributes => {}
                Some(existing) => *existing = attributes,
                None => {
                    self.hierarchical_facets.insert(name, attributes);
                }
            }
        }
        self.disjunctive_facets.extend(other.disjunctive_facets);
        self.facets.extend(other.facets);
        self.max_values_per_facet = match (self.max_values_per_facet, other.max_values_per_facet) {
            (Some(current), Some(incoming)) => Some(current.max(incoming)),
            (current, incoming) => current.or(incoming),
        };
    }

    /// Consuming variant of [`merge`](Self::merge).
    #[must_use]
    pub fn merged(mut self, other: SearchConfiguration) -> Self {
        self.merge(other);
        self
    }

    pub fn is_hierarchical(&self, facet: &str) -> bool {
        self.hierarchical_facets.contains_key(facet)
    }

    pub fn is_disjunctive(&self, facet: &str) -> bool {
        self.disjunctive_facets.contains(facet)
    }

    pub fn is_conjunctive(&self, facet: &str) -> bool {
        self.facets.contains(facet)
    }
}
