//! Composable faceted-search widgets driven by a shared query state.
//!
//! Widgets are built from option structs by the factories in [`widgets`],
//! registered on a [`SearchSession`], and render plain [`View`] data into
//! their [`Container`] after every search. The widget contract itself lives in
//! the `facetkit-widget-api` crate and is re-exported here.

pub mod app_dirs;
pub mod logging;
pub mod render;
pub mod session;
pub mod utils;
pub mod widgets;

pub use facetkit_widget_api as api;
pub use facetkit_widget_api::{
    ConfigurationError, QueryState, ResultsSnapshot, SearchConfiguration, SearchHelper, SortBy, Widget,
};
pub use render::{Container, MemoryContainer, View};
pub use session::{MemoryBackend, SearchBackend, SearchSession, SessionError, SessionHelper};
