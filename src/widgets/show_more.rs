use facetkit_widget_api::{ConfigurationError, Template, Templates};
use serde::{Deserialize, Deserializer};

use crate::render::templates::prefix_keys;

/// Limit used when show-more is enabled without an explicit limit.
pub const DEFAULT_SHOW_MORE_LIMIT: usize = 100;

const DEFAULT_ACTIVE_TEMPLATE: &str = "Show less";
const DEFAULT_INACTIVE_TEMPLATE: &str = "Show more";

/// Show-more option as written by the user: a switch or a detailed object.
#[derive(Debug, Clone, Default)]
pub enum ShowMore {
    #[default]
    Disabled,
    Enabled,
    Custom {
        templates: ShowMoreTemplateOptions,
        limit: Option<usize>,
    },
}

impl From<bool> for ShowMore {
    fn from(enabled: bool) -> Self {
        if enabled { ShowMore::Enabled } else { ShowMore::Disabled }
    }
}

// Wire shape: `true`/`false` or `{ limit, templates }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawShowMore {
    Switch(bool),
    Custom {
        #[serde(default)]
        templates: ShowMoreTemplateOptions,
        limit: Option<usize>,
    },
}

impl<'de> Deserialize<'de> for ShowMore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawShowMore::deserialize(deserializer)? {
            RawShowMore::Switch(enabled) => ShowMore::from(enabled),
            RawShowMore::Custom { templates, limit } => ShowMore::Custom { templates, limit },
        })
    }
}

/// Per-field template overrides of the show-more toggle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowMoreTemplateOptions {
    pub active: Option<Template>,
    pub inactive: Option<Template>,
}

/// Resolved show-more templates.
#[derive(Debug, Clone)]
pub struct ShowMoreTemplates {
    /// Shown while the list is expanded.
    pub active: Template,
    /// Shown while the list is collapsed.
    pub inactive: Template,
}

impl ShowMoreTemplates {
    /// Template slots keyed `show-more-active` / `show-more-inactive`.
    pub fn prefixed(&self) -> Templates {
        let templates = Templates::from([
            ("active".to_string(), self.active.clone()),
            ("inactive".to_string(), self.inactive.clone()),
        ]);
        prefix_keys("show-more-", templates)
    }
}

#[derive(Debug, Clone)]
pub struct ShowMoreConfig {
    pub templates: ShowMoreTemplates,
    pub limit: usize,
}

/// Normalize a show-more option into a concrete configuration.
pub fn resolve(show_more: &ShowMore) -> Result<Option<ShowMoreConfig>, ConfigurationError> {
    match show_more {
        ShowMore::Disabled => Ok(None),
        ShowMore::Enabled => Ok(Some(ShowMoreConfig {
            templates: default_templates(&ShowMoreTemplateOptions::default()),
            limit: DEFAULT_SHOW_MORE_LIMIT,
        })),
        ShowMore::Custom { templates, limit } => {
            let limit = limit.ok_or(ConfigurationError::MissingShowMoreLimit)?;
            Ok(Some(ShowMoreConfig {
                templates: default_templates(templates),
                limit,
            }))
        }
    }
}

fn default_templates(options: &ShowMoreTemplateOptions) -> ShowMoreTemplates {
    ShowMoreTemplates {
        active: options
            .active
            .clone()
            .unwrap_or_else(|| Template::from(DEFAULT_ACTIVE_TEMPLATE)),
        inactive: options
            .inactive
            .clone()
            .unwrap_or_else(|| Template::from(DEFAULT_INACTIVE_TEMPLATE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(template: &Template) -> &str {
        match template {
            Template::Text(text) => text,
            Template::Function(_) => panic!("expected a text template"),
        }
    }

    #[test]
    fn disabled_resolves_to_none() {
        assert!(resolve(&ShowMore::Disabled).expect("resolve").is_none());
    }

    #[test]
    fn enabled_uses_defaults() {
        let config = resolve(&ShowMore::Enabled).expect("resolve").expect("config");
        assert_eq!(config.limit, DEFAULT_SHOW_MORE_LIMIT);
        assert_eq!(text(&config.templates.active), "Show less");
        assert_eq!(text(&config.templates.inactive), "Show more");
    }

    #[test]
    fn custom_templates_are_defaulted_per_field() {
        let show_more = ShowMore::Custom {
            templates: ShowMoreTemplateOptions {
                active: Some(Template::from("Fewer")),
                inactive: None,
            },
            limit: Some(30),
        };
        let config = resolve(&show_more).expect("resolve").expect("config");
        assert_eq!(config.limit, 30);
        assert_eq!(text(&config.templates.active), "Fewer");
        assert_eq!(text(&config.templates.inactive), "Show more");
    }

    #[test]
    fn custom_without_limit_is_rejected() {
        let show_more = ShowMore::Custom {
            templates: ShowMoreTemplateOptions::default(),
            limit: None,
        };
        assert_eq!(
            resolve(&show_more).unwrap_err(),
            ConfigurationError::MissingShowMoreLimit
        );
    }

    #[test]
    fn prefixed_templates_use_show_more_keys() {
        let config = resolve(&ShowMore::Enabled).expect("resolve").expect("config");
        let keys: Vec<String> = config.templates.prefixed().into_keys().collect();
        assert_eq!(keys, ["show-more-active", "show-more-inactive"]);
    }

    #[test]
    fn deserialization_accepts_booleans_and_objects() {
        let parse = |json: &str| serde_json::from_str::<ShowMore>(json).expect("deserialize");

        assert!(matches!(parse("true"), ShowMore::Enabled));
        assert!(matches!(parse("false"), ShowMore::Disabled));
        assert!(matches!(
            parse(r#"{"limit": 20, "templates": {"active": "Less"}}"#),
            ShowMore::Custom { limit: Some(20), .. }
        ));
    }
}
