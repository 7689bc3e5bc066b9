use anyhow::Result;
use facetkit::render::View;
use facetkit::utils::format_number;
use serde_json::json;

use crate::workflow::SearchOutcome;

/// Print a plain-text representation of the search outcome.
pub(crate) fn print_plain(outcome: &SearchOutcome) {
    println!("{}", format_plain(outcome));
}

fn format_plain(outcome: &SearchOutcome) -> String {
    let searches = match outcome.searches {
        1 => "1 search".to_string(),
        count => format!("{count} searches"),
    };
    let mut lines = vec![format!(
        "{}: {} hits after {searches}",
        outcome.index, outcome.nb_hits
    )];
    if !outcome.query.is_empty() {
        lines.push(format!("query: {}", outcome.query));
    }

    for widget in &outcome.widgets {
        match &widget.view {
            None => lines.push(format!("{} ({}) not rendered", widget.container, widget.kind)),
            Some(View::Hidden) => lines.push(format!("{} ({}) hidden", widget.container, widget.kind)),
            Some(view) => {
                lines.push(format!("{} ({})", widget.container, widget.kind));
                describe(view, &mut lines);
            }
        }
    }
    lines.join("\n")
}

fn describe(view: &View, lines: &mut Vec<String>) {
    match view {
        View::Hidden => {}
        View::Panel(panel) => {
            lines.extend(panel.header.iter().map(|header| format!("  {header}")));
            describe(&panel.body, lines);
            lines.extend(panel.footer.iter().map(|footer| format!("  {footer}")));
        }
        View::RefinementList(props) => {
            for item in props.facet_values.iter().take(props.limit_min) {
                let label = props
                    .template_props
                    .render("item", &json!(item))
                    .unwrap_or_else(|| item.name.clone());
                lines.push(format!("  {} {label}", checkbox(item.is_refined)));
            }
            if props.show_more && props.facet_values.len() > props.limit_min {
                let more = props
                    .template_props
                    .render("show-more-inactive", &json!({}))
                    .unwrap_or_default();
                lines.push(format!("  {more}"));
            }
        }
        View::Slider(props) => {
            let side = |value: Option<f64>| value.map_or_else(|| "?".to_string(), format_number);
            let handle = |value: f64| {
                if value.is_finite() {
                    format_number(value)
                } else {
                    "open".to_string()
                }
            };
            lines.push(format!(
                "  range {}..{}, handles {}..{}, step {}",
                side(props.range.min),
                side(props.range.max),
                handle(props.start[0]),
                handle(props.start[1]),
                format_number(props.step)
            ));
        }
        View::PriceRanges(props) => {
            for range in &props.facet_values {
                let label = props
                    .template_props
                    .render("item", &json!(range))
                    .unwrap_or_else(|| range.label.clone());
                lines.push(format!("  {} {label}", checkbox(range.is_refined)));
            }
        }
        View::Selector(props) => {
            for option in &props.options {
                let marker = if option.value == props.current_value { ">" } else { " " };
                lines.push(format!("  {marker} {} [{}]", option.label, option.value));
            }
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Format the search outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
    let widgets = outcome
        .widgets
        .iter()
        .map(|widget| {
            json!({
                "container": widget.container,
                "kind": widget.kind.as_str(),
                "view": widget.view,
            })
        })
        .collect::<Vec<_>>();

    let payload = json!({
        "index": outcome.index,
        "query": outcome.query,
        "nb_hits": outcome.nb_hits,
        "searches": outcome.searches,
        "widgets": widgets,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search outcome.
pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
