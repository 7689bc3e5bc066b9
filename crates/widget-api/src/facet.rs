use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A discrete facet value derived from a results snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub name: String,
    /// Full hierarchical path; equal to `name` for single-level facets.
    pub path: String,
    pub count: u64,
    pub is_refined: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhaustive: Option<bool>,
}

/// A single ordering criterion for facet values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    CountDesc,
    CountAsc,
    NameAsc,
    NameDesc,
    /// Refined values first.
    RefinedFirst,
    /// Refined values last.
    RefinedLast,
}

impl SortKey {
    #[must_use]
    pub fn compare(self, left: &FacetValue, right: &FacetValue) -> Ordering {
        match self {
            SortKey::CountDesc => right.count.cmp(&left.count),
            SortKey::CountAsc => left.count.cmp(&right.count),
            SortKey::NameAsc => left.name.cmp(&right.name),
            SortKey::NameDesc => right.name.cmp(&left.name),
            SortKey::RefinedFirst => right.is_refined.cmp(&left.is_refined),
            SortKey::RefinedLast => left.is_refined.cmp(&right.is_refined),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::CountDesc => "count:desc",
            SortKey::CountAsc => "count:asc",
            SortKey::NameAsc => "name:asc",
            SortKey::NameDesc => "name:desc",
            SortKey::RefinedFirst => "isRefined",
            SortKey::RefinedLast => "isRefined:asc",
        }
    }
}

impl FromStr for SortKey {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "count" | "count:desc" => Ok(SortKey::CountDesc),
            "count:asc" => Ok(SortKey::CountAsc),
            "name" | "name:asc" => Ok(SortKey::NameAsc),
            "name:desc" => Ok(SortKey::NameDesc),
            "isRefined" | "isRefined:desc" => Ok(SortKey::RefinedFirst),
            "isRefined:asc" => Ok(SortKey::RefinedLast),
            other => Err(ConfigurationError::InvalidSortKey {
                key: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller supplied ordering used instead of sort keys.
pub type FacetComparator = Arc<dyn Fn(&FacetValue, &FacetValue) -> Ordering + Send + Sync>;

/// How facet values are ordered before they reach a view.
#[derive(Clone)]
pub enum SortBy {
    /// Keys applied in order; later keys break ties of earlier ones.
    Keys(Vec<SortKey>),
    Comparator(FacetComparator),
}

impl SortBy {
    /// Parse textual sort keys such as `count:desc`.
    pub fn parse<I, S>(keys: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| key.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()
            .map(SortBy::Keys)
    }

    /// Combined ordering of two values; `Equal` leaves the aggregation order intact.
    #[must_use]
    pub fn compare(&self, left: &FacetValue, right: &FacetValue) -> Ordering {
        match self {
            SortBy::Keys(keys) => keys
                .iter()
                .map(|key| key.compare(left, right))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal),
            SortBy::Comparator(comparator) => comparator(left, right),
        }
    }
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Keys(vec![SortKey::CountDesc])
    }
}

impl fmt::Debug for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Keys(keys) => f.debug_tuple("Keys").field(keys).finish(),
            SortBy::Comparator(_) => f.write_str("Comparator(..)"),
        }
    }
}
