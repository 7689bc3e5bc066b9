use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use facetkit_widget_api::{Template, Templates, TemplatesConfig};
use serde_json::Value;

/// Hook applied to template data before a template renders.
pub type TransformData = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Everything a view needs to render the template slots of a widget.
#[derive(Clone, Default)]
pub struct TemplateProps {
    pub templates: Templates,
    /// Slots whose template was supplied by the user rather than defaulted.
    pub use_custom_compile_options: BTreeMap<String, bool>,
    pub transform_data: Option<TransformData>,
    pub templates_config: TemplatesConfig,
}

impl TemplateProps {
    /// Render the `key` slot with `data`; `None` when the slot does not exist.
    pub fn render(&self, key: &str, data: &Value) -> Option<String> {
        let template = self.templates.get(key)?;
        let data = match &self.transform_data {
            Some(transform) => transform(data.clone()),
            None => data.clone(),
        };
        Some(match template {
            Template::Text(text) => interpolate(text, &data, &self.templates_config),
            Template::Function(render) => render(&data),
        })
    }
}

impl fmt::Debug for TemplateProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateProps")
            .field("templates", &self.templates)
            .field("use_custom_compile_options", &self.use_custom_compile_options)
            .field("transform_data", &self.transform_data.is_some())
            .field("templates_config", &self.templates_config)
            .finish()
    }
}

/// Merge user templates over a widget's defaults.
pub fn prepare_template_props(
    transform_data: Option<TransformData>,
    default_templates: &Templates,
    templates_config: &TemplatesConfig,
    templates: &Templates,
) -> TemplateProps {
    let mut merged = default_templates.clone();
    let mut use_custom_compile_options = BTreeMap::new();
    for key in default_templates.keys() {
        use_custom_compile_options.insert(key.clone(), false);
    }
    for (key, template) in templates {
        merged.insert(key.clone(), template.clone());
        use_custom_compile_options.insert(key.clone(), true);
    }

    TemplateProps {
        templates: merged,
        use_custom_compile_options,
        transform_data,
        templates_config: templates_config.clone(),
    }
}

/// Prefix every template key, e.g. `active` becomes `show-more-active`.
pub fn prefix_keys(prefix: &str, templates: Templates) -> Templates {
    templates
        .into_iter()
        .map(|(key, template)| (format!("{prefix}{key}"), template))
        .collect()
}

/// Substitute `{{field}}` and `{{field|helper}}` placeholders.
///
/// Fields are dotted paths into `data`; missing fields render as empty text and
/// unknown helpers leave the value untouched.
pub fn interpolate(text: &str, data: &Value, config: &TemplatesConfig) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            output.push_str(&rest[start..]);
            return output;
        };

        let placeholder = after_open[..end].trim();
        let (path, helper) = match placeholder.split_once('|') {
            Some((path, helper)) => (path.trim(), Some(helper.trim())),
            None => (placeholder, None),
        };
        let value = lookup(data, path).map(display_value).unwrap_or_default();
        match helper.and_then(|name| config.helpers.get(name)) {
            Some(helper) => output.push_str(&helper(value.as_str())),
            None => output.push_str(&value),
        }

        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    output
}

fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(data, |value, segment| value.get(segment))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn interpolation_reads_nested_fields_and_helpers() {
        let config = TemplatesConfig::default().with_helper("upper", |value| value.to_uppercase());
        let data = json!({"name": "apple", "meta": {"count": 3}});

        assert_eq!(
            interpolate("{{ name|upper }}: {{meta.count}}{{missing}}", &data, &config),
            "APPLE: 3"
        );
    }

    #[test]
    fn unterminated_placeholders_are_kept_verbatim() {
        let data = json!({"name": "apple"});
        assert_eq!(
            interpolate("{{name}} {{oops", &data, &TemplatesConfig::default()),
            "apple {{oops"
        );
    }

    #[test]
    fn user_templates_override_defaults() {
        let defaults = Templates::from([
            ("header".to_string(), Template::from("")),
            ("item".to_string(), Template::from("{{name}}")),
        ]);
        let user = Templates::from([("item".to_string(), Template::from("<{{name}}>"))]);
        let props = prepare_template_props(None, &defaults, &TemplatesConfig::default(), &user);

        assert_eq!(props.render("item", &json!({"name": "a"})).as_deref(), Some("<a>"));
        assert_eq!(props.render("header", &Value::Null).as_deref(), Some(""));
        assert_eq!(props.render("footer", &Value::Null), None);
        assert_eq!(props.use_custom_compile_options.get("item"), Some(&true));
        assert_eq!(props.use_custom_compile_options.get("header"), Some(&false));
    }

    #[test]
    fn transform_data_runs_before_rendering() {
        let defaults = Templates::from([("item".to_string(), Template::from("{{label}}"))]);
        let transform: TransformData = Arc::new(|mut data: Value| {
            let name = data["name"].as_str().unwrap_or_default().to_string();
            data["label"] = Value::String(format!("#{name}"));
            data
        });
        let props = prepare_template_props(
            Some(transform),
            &defaults,
            &TemplatesConfig::default(),
            &Templates::new(),
        );

        assert_eq!(props.render("item", &json!({"name": "a"})).as_deref(), Some("#a"));
    }

    #[test]
    fn function_templates_receive_the_data() {
        let defaults = Templates::from([(
            "item".to_string(),
            Template::function(|data| format!("{} items", data["count"])),
        )]);
        let props = prepare_template_props(None, &defaults, &TemplatesConfig::default(), &Templates::new());
        assert_eq!(props.render("item", &json!({"count": 4})).as_deref(), Some("4 items"));
    }
}
