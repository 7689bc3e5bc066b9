use facetkit_widget_api::{FacetKind, FacetValue, QueryState, ResultsSnapshot, SortBy};
use log::trace;

/// Extract the values of `facet_name` from `results`, ordered by `sort_by`.
///
/// Missing facets (no search yet, or an attribute the backend did not
/// aggregate) produce an empty list. The sort is stable, so values that compare
/// equal keep the order the backend aggregated them in. No truncation happens
/// here: the backend already honours `max_values_per_facet`.
pub fn facet_values(results: &ResultsSnapshot, facet_name: &str, sort_by: &SortBy) -> Vec<FacetValue> {
    let Some((kind, facet)) = results.facet(facet_name) else {
        trace!("facet '{facet_name}' absent from results");
        return Vec::new();
    };

    let mut values: Vec<FacetValue> = facet
        .data
        .iter()
        .map(|(name, count)| FacetValue {
            name: name.clone(),
            path: name.clone(),
            count: *count,
            is_refined: is_refined(&results.state, kind, facet_name, name),
            exhaustive: Some(facet.exhaustive),
        })
        .collect();

    values.sort_by(|left, right| sort_by.compare(left, right));
    values
}

fn is_refined(state: &QueryState, kind: FacetKind, facet: &str, value: &str) -> bool {
    let refinements = match kind {
        FacetKind::Hierarchical => state.hierarchical_refinements(),
        FacetKind::Disjunctive => state.disjunctive_refinements(),
        FacetKind::Conjunctive => state.facet_refinements(),
    };
    refinements
        .get(facet)
        .is_some_and(|values| values.iter().any(|refined| refined == value))
}
