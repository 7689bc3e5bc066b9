use std::str::FromStr;

use clap::ValueEnum;

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

/// A `CONTAINER=VALUE` pair targeting the widget mounted in `container`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub(crate) container: String,
    pub(crate) value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (container, value) = input
            .split_once('=')
            .ok_or_else(|| format!("expected CONTAINER=VALUE, got '{input}'"))?;
        let container = container.trim();
        if container.is_empty() {
            return Err(format!("missing container in '{input}'"));
        }
        Ok(Self {
            container: container.to_string(),
            value: value.to_string(),
        })
    }
}

impl Assignment {
    /// Split a `LO:HI` value; an empty side is `None`.
    pub(crate) fn bounds(&self) -> Result<(Option<f64>, Option<f64>), String> {
        let (low, high) = self
            .value
            .split_once(':')
            .ok_or_else(|| format!("expected LO:HI for {}, got '{}'", self.container, self.value))?;
        Ok((parse_bound(low)?, parse_bound(high)?))
    }
}

fn parse_bound(text: &str) -> Result<Option<f64>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|err| format!("invalid bound '{text}': {err}"))
}
