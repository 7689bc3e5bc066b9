use facetkit::api::{SortBy, Templates};
use facetkit::widgets::menu::DEFAULT_LIMIT;
use facetkit::widgets::{IndexOption, ShowMore};
use serde::Deserialize;

use super::super::resolved::{ConfigError, SettingSource, WidgetKind, WidgetSpec};

/// A `[[widgets]]` entry as written in a configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(in crate::settings) struct RawWidget {
    pub(in crate::settings) kind: Option<WidgetKind>,
    pub(in crate::settings) container: Option<String>,
    pub(in crate::settings) attribute: Option<String>,
    pub(in crate::settings) limit: Option<usize>,
    pub(in crate::settings) sort_by: Option<Vec<String>>,
    pub(in crate::settings) show_more: Option<ShowMore>,
    pub(in crate::settings) templates: Option<Templates>,
    pub(in crate::settings) auto_hide_container: Option<bool>,
    pub(in crate::settings) step: Option<f64>,
    pub(in crate::settings) pips: Option<bool>,
    pub(in crate::settings) tooltips: Option<bool>,
    pub(in crate::settings) currency: Option<String>,
    pub(in crate::settings) indices: Option<Vec<IndexOption>>,
}

impl RawWidget {
    /// Fill per-kind defaults; `position` names the entry in errors.
    pub(in crate::settings) fn resolve(self, position: usize) -> Result<WidgetSpec, ConfigError> {
        let origin = SettingSource::ConfigKey("widgets");
        let kind = self.kind.ok_or_else(|| {
            ConfigError::invalid(
                format!("widgets[{position}].kind"),
                "(unset)",
                origin.clone(),
                "expected one of menu, range_slider, price_ranges, sort_by_selector",
            )
        })?;
        let container = self
            .container
            .map(|container| container.trim().to_string())
            .filter(|container| !container.is_empty())
            .ok_or_else(|| {
                ConfigError::invalid(
                    format!("widgets[{position}].container"),
                    "(unset)",
                    origin.clone(),
                    "every widget needs a container",
                )
            })?;
        let sort_by = match self.sort_by {
            Some(keys) => SortBy::parse(&keys).map_err(|err| {
                ConfigError::invalid(
                    format!("widgets[{position}].sort_by"),
                    keys.join(","),
                    origin.clone(),
                    err.to_string(),
                )
            })?,
            None => SortBy::default(),
        };

        Ok(WidgetSpec {
            kind,
            container,
            attribute: self.attribute.unwrap_or_default(),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            sort_by,
            show_more: self.show_more.unwrap_or_default(),
            templates: self.templates.unwrap_or_default(),
            auto_hide_container: self
                .auto_hide_container
                .unwrap_or(kind.default_auto_hide_container()),
            step: self.step.unwrap_or(1.0),
            pips: self.pips.unwrap_or(true),
            tooltips: self.tooltips.unwrap_or(true),
            currency: self.currency.unwrap_or_else(|| "$".to_string()),
            indices: self.indices.unwrap_or_default(),
        })
    }
}
