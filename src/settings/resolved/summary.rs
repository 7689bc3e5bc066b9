use super::{ResolvedConfig, WidgetKind, WidgetSpec};

pub(super) fn print_summary(config: &ResolvedConfig) {
    for line in summary_lines(config) {
        println!("{line}");
    }
}

fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
    let mut lines = vec![
        "Effective configuration:".to_string(),
        format!("  Index: {}", config.index),
        format!(
            "  Records: {}",
            config
                .records
                .as_ref()
                .map_or_else(|| "(unset)".to_string(), |path| path.display().to_string())
        ),
    ];
    if !config.query.is_empty() {
        lines.push(format!("  Query: {}", config.query));
    }
    lines.push(format!("  Widgets: {}", config.widgets.len()));
    lines.extend(config.widgets.iter().map(widget_line));
    lines
}

fn widget_line(widget: &WidgetSpec) -> String {
    let details = match widget.kind {
        WidgetKind::Menu => format!("attribute {}, limit {}", widget.attribute, widget.limit),
        WidgetKind::RangeSlider => format!("attribute {}, step {}", widget.attribute, widget.step),
        WidgetKind::PriceRanges => format!("attribute {}, currency {}", widget.attribute, widget.currency),
        WidgetKind::SortBySelector => format!(
            "indices {}",
            widget
                .indices
                .iter()
                .map(|option| option.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    format!(
        "    {} {} ({details}; auto-hide {})",
        widget.container,
        widget.kind,
        bool_to_word(widget.auto_hide_container)
    )
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use facetkit::api::{SortBy, Templates};
    use facetkit::widgets::ShowMore;

    use super::*;

    #[test]
    fn bool_to_word_matches_expectations() {
        assert_eq!(super::bool_to_word(true), "yes");
        assert_eq!(super::bool_to_word(false), "no");
    }

    #[test]
    fn summary_lists_every_widget() {
        let config = ResolvedConfig {
            index: "products".into(),
            records: Some(PathBuf::from("records.json")),
            query: "phone".into(),
            widgets: vec![WidgetSpec {
                kind: WidgetKind::Menu,
                container: "#brands".into(),
                attribute: "brand".into(),
                limit: 5,
                sort_by: SortBy::default(),
                show_more: ShowMore::Disabled,
                templates: Templates::new(),
                auto_hide_container: true,
                step: 1.0,
                pips: true,
                tooltips: true,
                currency: "$".into(),
                indices: Vec::new(),
            }],
        };

        let lines = summary_lines(&config);
        assert_eq!(lines[3], "  Query: phone");
        assert_eq!(lines[5], "    #brands menu (attribute brand, limit 5; auto-hide yes)");
        print_summary(&config);
    }
}
