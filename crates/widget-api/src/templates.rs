use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Template implemented as a function of the template data.
pub type TemplateFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Formatting helper available to every template through `{{field|helper}}`.
pub type TemplateHelper = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A single template slot such as `header`, `item` or `footer`.
#[derive(Clone)]
pub enum Template {
    /// Text with `{{field}}` placeholders.
    Text(String),
    Function(TemplateFn),
}

impl Template {
    pub fn function<F>(render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Template::Function(Arc::new(render))
    }
}

impl From<&str> for Template {
    fn from(value: &str) -> Self {
        Template::Text(value.to_string())
    }
}

impl From<String> for Template {
    fn from(value: String) -> Self {
        Template::Text(value)
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Template::Text)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Template::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Templates keyed by slot name.
pub type Templates = BTreeMap<String, Template>;

/// Session-wide template settings shared by every widget.
#[derive(Clone, Default)]
pub struct TemplatesConfig {
    pub helpers: BTreeMap<String, TemplateHelper>,
}

impl TemplatesConfig {
    #[must_use]
    pub fn with_helper<F>(mut self, name: impl Into<String>, helper: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Arc::new(helper));
        self
    }
}

impl fmt::Debug for TemplatesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplatesConfig")
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}
