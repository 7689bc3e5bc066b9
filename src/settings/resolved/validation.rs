use std::collections::HashSet;

use super::{ConfigError, ConfigSources, ResolvedConfig, SettingSource, WidgetKind};

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
    if config.records.is_none() {
        return Err(ConfigError::invalid(
            "records",
            "(unset)",
            sources.source_for_records(),
            "a JSON file of records is required",
        ));
    }

    if config.index.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid(
            "index",
            config.index.clone(),
            sources.source_for_index(),
            "index names cannot contain whitespace",
        ));
    }

    if config.widgets.is_empty() {
        return Err(ConfigError::invalid(
            "widgets",
            "[]",
            SettingSource::ConfigKey("widgets"),
            "declare at least one widget",
        ));
    }

    let mut containers = HashSet::new();
    for (position, widget) in config.widgets.iter().enumerate() {
        if !containers.insert(widget.container.as_str()) {
            return Err(ConfigError::invalid(
                format!("widgets[{position}].container"),
                widget.container.clone(),
                SettingSource::ConfigKey("widgets"),
                "containers must be unique",
            ));
        }

        if widget.kind == WidgetKind::Menu && widget.limit == 0 {
            return Err(ConfigError::invalid(
                format!("widgets[{position}].limit"),
                widget.limit.to_string(),
                SettingSource::ConfigKey("widgets"),
                "must be greater than zero",
            ));
        }

        if widget.kind == WidgetKind::RangeSlider && !(widget.step.is_finite() && widget.step > 0.0) {
            return Err(ConfigError::invalid(
                format!("widgets[{position}].step"),
                widget.step.to_string(),
                SettingSource::ConfigKey("widgets"),
                "must be a positive number",
            ));
        }
    }

    Ok(())
}
