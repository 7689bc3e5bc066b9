//! Widget lifecycle contract and data model shared by facetkit widgets.
//!
//! Widgets contribute a [`SearchConfiguration`] before the first search, render
//! from each [`ResultsSnapshot`], and mutate the session's [`QueryState`] through
//! a [`SearchHelper`].

pub mod configuration;
pub mod error;
pub mod facet;
pub mod helper;
pub mod results;
pub mod state;
pub mod templates;
pub mod widget;

pub use configuration::SearchConfiguration;
pub use error::ConfigurationError;
pub use facet::{FacetComparator, FacetValue, SortBy, SortKey};
pub use helper::{SearchHelper, SharedHelper};
pub use results::{FacetKind, FacetResult, FacetStats, ResultsSnapshot};
pub use state::{NumericOperator, NumericRefinements, QueryState};
pub use templates::{Template, TemplateFn, TemplateHelper, Templates, TemplatesConfig};
pub use widget::{InitContext, RenderContext, UrlBuilder, Widget};
