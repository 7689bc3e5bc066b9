use std::collections::BTreeMap;
use std::fmt::Write;

use facetkit_widget_api::QueryState;

use crate::utils::{encode_component, format_number};

/// Serialize the refinements of `state` into a query string.
///
/// Keys follow the `hFR` / `dFR` / `fR` / `nR` layout of hierarchical,
/// disjunctive, conjunctive and numeric refinements, e.g.
/// `?index=products&hFR%5Bbrand%5D%5B0%5D=Apple`.
pub fn query_string(state: &QueryState) -> String {
    let mut pairs: Vec<(String, String)> = vec![("index".into(), state.index().to_string())];
    if !state.query().is_empty() {
        pairs.push(("q".into(), state.query().to_string()));
    }
    push_facet_pairs(&mut pairs, "hFR", state.hierarchical_refinements());
    push_facet_pairs(&mut pairs, "dFR", state.disjunctive_refinements());
    push_facet_pairs(&mut pairs, "fR", state.facet_refinements());
    for (attribute, by_operator) in state.numeric_refinements() {
        for (operator, values) in by_operator {
            for (position, value) in values.iter().enumerate() {
                pairs.push((
                    format!("nR[{attribute}][{operator}][{position}]"),
                    format_number(*value),
                ));
            }
        }
    }

    let mut query = String::from("?");
    for (position, (key, value)) in pairs.iter().enumerate() {
        if position > 0 {
            query.push('&');
        }
        let _ = write!(query, "{}={}", encode_component(key), encode_component(value));
    }
    query
}

fn push_facet_pairs(pairs: &mut Vec<(String, String)>, prefix: &str, refinements: &BTreeMap<String, Vec<String>>) {
    for (attribute, values) in refinements {
        for (position, value) in values.iter().enumerate() {
            pairs.push((format!("{prefix}[{attribute}][{position}]"), value.clone()));
        }
    }
}
