use thiserror::Error;

/// Errors raised while constructing or initialising a widget.
///
/// These are always reported before the widget takes part in a search; render
/// never produces them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required option was missing; carries the widget's usage text.
    #[error("{widget} is missing `{option}`\n{usage}")]
    Usage {
        widget: &'static str,
        option: &'static str,
        usage: &'static str,
    },

    /// The show-more limit must exceed the base limit.
    #[error(
        "showMore.limit configuration should be > than the limit in the main configuration (showMore.limit: {show_more_limit}, limit: {limit})"
    )]
    ShowMoreLimit { limit: usize, show_more_limit: usize },

    /// A show-more object was supplied without a limit.
    #[error("showMore.limit is required when showMore is configured with an object")]
    MissingShowMoreLimit,

    #[error("unknown sort key '{key}' (expected count|name|isRefined with an optional :asc or :desc)")]
    InvalidSortKey { key: String },

    /// An option carried a value outside its accepted range.
    #[error("invalid value for `{option}` in {widget}: {reason}")]
    InvalidOption {
        widget: &'static str,
        option: &'static str,
        reason: String,
    },

    /// The session index is not one of the selectable indices.
    #[error("index '{index}' is not one of the configured indices ({available})")]
    UnknownIndex { index: String, available: String },
}

impl ConfigurationError {
    pub fn usage(widget: &'static str, option: &'static str, usage: &'static str) -> Self {
        Self::Usage {
            widget,
            option,
            usage,
        }
    }

    pub fn invalid_option<R>(widget: &'static str, option: &'static str, reason: R) -> Self
    where
        R: Into<String>,
    {
        Self::InvalidOption {
            widget,
            option,
            reason: reason.into(),
        }
    }
}
