use std::sync::Arc;

use facetkit::api::SortBy;
use facetkit::render::View;
use facetkit::widgets::{MenuOptions, RangeSliderOptions, menu, range_slider};
use facetkit::{MemoryBackend, MemoryContainer, SearchHelper, SearchSession};
use serde_json::json;

fn backend() -> MemoryBackend {
    MemoryBackend::from_value(json!([
        {"name": "Galaxy", "brand": "Samsung", "price": 300},
        {"name": "Note", "brand": "Samsung", "price": 700},
        {"name": "iPhone", "brand": "Apple", "price": 999},
        {"name": "Pixel", "brand": "Google", "price": 500},
        {"name": "Pixel Pro", "brand": "Google", "price": 800},
        {"name": "Pixel A", "brand": "Google", "price": 400}
    ]))
    .expect("records")
}

struct Layout {
    session: SearchSession<MemoryBackend>,
    brands: Arc<MemoryContainer>,
    price: Arc<MemoryContainer>,
}

fn layout(sort_by: SortBy) -> Layout {
    let brands = Arc::new(MemoryContainer::new("#brands"));
    let price = Arc::new(MemoryContainer::new("#price"));
    let mut session = SearchSession::new("products", backend());
    session
        .add_widget(
            menu(MenuOptions {
                container: Some(brands.clone()),
                attribute_name: "brand".into(),
                sort_by,
                ..MenuOptions::default()
            })
            .expect("menu"),
        )
        .expect("add menu");
    session
        .add_widget(
            range_slider(RangeSliderOptions {
                container: Some(price.clone()),
                attribute_name: "price".into(),
                ..RangeSliderOptions::default()
            })
            .expect("slider"),
        )
        .expect("add slider");
    session.start().expect("start");
    Layout { session, brands, price }
}

fn menu_items(container: &MemoryContainer) -> Vec<(String, u64, bool)> {
    let view = container.view().expect("menu mounted");
    let View::RefinementList(props) = view.body() else {
        panic!("expected a refinement list, got {view:?}");
    };
    props
        .facet_values
        .iter()
        .map(|item| (item.name.clone(), item.count, item.is_refined))
        .collect()
}

fn toggle(layout: &mut Layout, value: &str) {
    let view = layout.brands.view().expect("menu mounted");
    let View::RefinementList(props) = view.body() else {
        panic!("expected a refinement list");
    };
    props.toggle_refinement.call(value.to_string());
    assert!(layout.session.run_pending().expect("search"));
}

fn nb_hits(layout: &Layout) -> usize {
    layout.session.results().map_or(0, |results| results.nb_hits)
}

#[test]
fn menu_values_follow_the_configured_order() {
    let by_count = layout(SortBy::default());
    assert_eq!(
        menu_items(&by_count.brands),
        vec![
            ("Google".to_string(), 3, false),
            ("Samsung".to_string(), 2, false),
            ("Apple".to_string(), 1, false),
        ]
    );

    let by_name = layout(SortBy::parse(["name:asc"]).expect("sort keys"));
    let names: Vec<String> = menu_items(&by_name.brands).into_iter().map(|(name, _, _)| name).collect();
    assert_eq!(names, ["Apple", "Google", "Samsung"]);
}

#[test]
fn selecting_the_refined_value_clears_the_menu() {
    let mut layout = layout(SortBy::default());

    toggle(&mut layout, "Samsung");
    assert_eq!(nb_hits(&layout), 2);
    assert!(menu_items(&layout.brands).contains(&("Samsung".to_string(), 2, true)));

    toggle(&mut layout, "Samsung");
    assert_eq!(nb_hits(&layout), 6);
    assert!(menu_items(&layout.brands).iter().all(|(_, _, refined)| !refined));
}

#[test]
fn selecting_another_value_replaces_the_refinement() {
    let mut layout = layout(SortBy::default());

    toggle(&mut layout, "Apple");
    toggle(&mut layout, "Samsung");

    assert_eq!(nb_hits(&layout), 2);
    let state = layout.session.state();
    assert!(state.is_refined("brand", "Samsung"));
    assert!(!state.is_refined("brand", "Apple"));
}

#[test]
fn selected_menu_keeps_listing_the_other_values() {
    let mut layout = layout(SortBy::default());

    toggle(&mut layout, "Samsung");
    assert_eq!(nb_hits(&layout), 2);
    assert_eq!(
        menu_items(&layout.brands),
        vec![
            ("Google".to_string(), 3, false),
            ("Samsung".to_string(), 2, true),
            ("Apple".to_string(), 1, false),
        ]
    );

    toggle(&mut layout, "Apple");
    assert_eq!(nb_hits(&layout), 1);
    let items = menu_items(&layout.brands);
    assert!(items.contains(&("Apple".to_string(), 1, true)));
    assert!(items.contains(&("Samsung".to_string(), 2, false)));
}

#[test]
fn slider_only_refines_the_side_that_moved() {
    let mut layout = layout(SortBy::default());
    let view = layout.price.view().expect("slider mounted");
    let View::Slider(props) = view.body() else {
        panic!("expected a slider, got {view:?}");
    };
    assert_eq!((props.range.min, props.range.max), (Some(300.0), Some(999.0)));

    props.on_change.call([500.0, 999.0]);
    assert!(layout.session.run_pending().expect("search"));

    assert_eq!(nb_hits(&layout), 4);
    let view = layout.price.view().expect("slider mounted");
    let View::Slider(props) = view.body() else {
        panic!("expected a slider");
    };
    assert_eq!(props.start, [500.0, f64::INFINITY]);
    assert_eq!((props.range.min, props.range.max), (Some(300.0), Some(999.0)));
}

#[test]
fn rerendering_unchanged_results_mounts_the_same_views() {
    let mut layout = layout(SortBy::default());
    let before = serde_json::to_string(&layout.brands.view()).expect("serialize");

    assert!(!layout.session.run_pending().expect("nothing pending"));
    layout.session.helper().search();
    assert!(layout.session.run_pending().expect("search"));

    let after = serde_json::to_string(&layout.brands.view()).expect("serialize");
    assert_eq!(before, after);
    assert_eq!(layout.brands.mounts(), 2);
    assert_eq!(layout.session.searches_executed(), 2);
}
