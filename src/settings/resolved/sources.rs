use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
    CliFlag(&'static str),
    Environment(&'static str),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::Environment(var) => write!(f, "environment variable `{var}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
    pub(crate) index: Option<SettingSource>,
    pub(crate) records: Option<SettingSource>,
}

impl ConfigSources {
    pub(crate) fn source_for_index(&self) -> SettingSource {
        self.index.clone().unwrap_or(SettingSource::ConfigKey("index"))
    }

    pub(crate) fn source_for_records(&self) -> SettingSource {
        self.records
            .clone()
            .unwrap_or(SettingSource::ConfigKey("records"))
    }
}
