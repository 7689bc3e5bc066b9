use anyhow::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod widgets;

pub(super) use widgets::RawWidget;

/// Default index searched when neither a file nor the CLI names one.
pub(super) const DEFAULT_INDEX: &str = "products";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    pub(super) index: Option<String>,
    pub(super) records: Option<PathBuf>,
    pub(super) query: Option<String>,
    pub(super) widgets: Vec<RawWidget>,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(index) = cli.index.clone() {
            self.index = Some(index);
        }
        if let Some(records) = cli.records.clone() {
            self.records = Some(records);
        }
        if let Some(query) = cli.query.clone() {
            self.query = Some(query);
        }
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            index: detect_source(
                cli.index.is_some(),
                self.index.is_some(),
                "FACETKIT__INDEX",
                "--index",
                "index",
            ),
            records: detect_source(
                cli.records.is_some(),
                self.records.is_some(),
                "FACETKIT__RECORDS",
                "--records",
                "records",
            ),
        };

        let widgets = self
            .widgets
            .into_iter()
            .enumerate()
            .map(|(position, widget)| widget.resolve(position))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::new)?;

        let config = ResolvedConfig {
            index: self
                .index
                .filter(|index| !index.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_INDEX.to_string()),
            records: self.records,
            query: self.query.unwrap_or_default(),
            widgets,
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}
