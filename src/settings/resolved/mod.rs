use std::fmt;
use std::path::PathBuf;

use facetkit::api::{SortBy, Templates};
use facetkit::widgets::{IndexOption, ShowMore};
use serde::Deserialize;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Widgets that can be declared in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Menu,
    RangeSlider,
    PriceRanges,
    SortBySelector,
}

impl WidgetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Menu => "menu",
            WidgetKind::RangeSlider => "range_slider",
            WidgetKind::PriceRanges => "price_ranges",
            WidgetKind::SortBySelector => "sort_by_selector",
        }
    }

    pub(crate) fn default_auto_hide_container(self) -> bool {
        !matches!(self, WidgetKind::SortBySelector)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A widget declaration with every default filled in.
///
/// Options that do not apply to `kind` are carried but ignored.
#[derive(Debug, Clone)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub container: String,
    pub attribute: String,
    pub limit: usize,
    pub sort_by: SortBy,
    pub show_more: ShowMore,
    pub templates: Templates,
    pub auto_hide_container: bool,
    pub step: f64,
    pub pips: bool,
    pub tooltips: bool,
    pub currency: String,
    pub indices: Vec<IndexOption>,
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub index: String,
    /// Validated to be present.
    pub records: Option<PathBuf>,
    pub query: String,
    pub widgets: Vec<WidgetSpec>,
}

impl ResolvedConfig {
    pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
        validation::validate(self, sources)
    }

    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        summary::print_summary(self);
    }
}
