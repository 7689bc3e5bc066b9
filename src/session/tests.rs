use std::sync::{Arc, Mutex};

use facetkit_widget_api::{
    ConfigurationError, InitContext, RenderContext, ResultsSnapshot, SearchConfiguration, SearchHelper, Widget,
};
use serde_json::json;

use super::*;
use crate::render::MemoryContainer;
use crate::widgets::{IndexOption, MenuOptions, SortBySelectorOptions, menu, sort_by_selector};

/// Records lifecycle calls into a shared log.
struct Probe {
    label: &'static str,
    contribution: SearchConfiguration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Probe {
    fn new(label: &'static str, contribution: SearchConfiguration, calls: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label,
            contribution,
            calls: Arc::clone(calls),
        }
    }

    fn record(&self, event: &str) {
        self.calls.lock().unwrap().push(format!("{}:{event}", self.label));
    }
}

impl Widget for Probe {
    fn name(&self) -> &'static str {
        self.label
    }

    fn get_configuration(&self, seed: &SearchConfiguration) -> SearchConfiguration {
        let mut contribution = self.contribution.clone();
        if let (Some(seed), Some(own)) = (seed.max_values_per_facet, contribution.max_values_per_facet) {
            contribution.max_values_per_facet = Some(seed.max(own));
        }
        contribution
    }

    fn init(&mut self, _context: InitContext<'_>) -> Result<(), ConfigurationError> {
        self.record("init");
        Ok(())
    }

    fn render(&mut self, context: RenderContext<'_>) {
        self.record(&format!("render({})", context.results.nb_hits));
    }
}

/// Backend counting the searches it executes.
#[derive(Default)]
struct CountingBackend {
    inner: MemoryBackend,
    calls: Mutex<usize>,
}

impl SearchBackend for CountingBackend {
    fn search(&self, state: &QueryState) -> Result<ResultsSnapshot, BackendError> {
        *self.calls.lock().unwrap() += 1;
        self.inner.search(state)
    }
}

fn records() -> MemoryBackend {
    MemoryBackend::from_value(json!([
        {"brand": "Apple", "price": 10},
        {"brand": "Samsung", "price": 20},
        {"brand": "Samsung", "price": 30},
    ]))
    .unwrap()
}

#[test]
fn configuration_merge_does_not_depend_on_registration_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let first = || {
        Probe::new(
            "a",
            SearchConfiguration::default()
                .with_hierarchical_facet("brand")
                .with_max_values_per_facet(10),
            &calls,
        )
    };
    let second = || {
        Probe::new(
            "b",
            SearchConfiguration::default()
                .with_disjunctive_facet("price")
                .with_max_values_per_facet(20),
            &calls,
        )
    };

    let mut forward = SearchSession::new("products", MemoryBackend::default());
    forward.add_widget(first()).unwrap();
    forward.add_widget(second()).unwrap();
    let mut backward = SearchSession::new("products", MemoryBackend::default());
    backward.add_widget(second()).unwrap();
    backward.add_widget(first()).unwrap();

    assert_eq!(forward.configuration(), backward.configuration());
    assert_eq!(forward.configuration().max_values_per_facet, Some(20));
}

#[test]
fn start_initialises_then_renders_every_widget_in_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut session = SearchSession::new("products", records());
    session
        .add_widget(Probe::new("a", SearchConfiguration::default(), &calls))
        .unwrap();
    session
        .add_widget(Probe::new("b", SearchConfiguration::default(), &calls))
        .unwrap();

    let results = session.start().unwrap();
    assert_eq!(results.nb_hits, 3);
    assert_eq!(
        *calls.lock().unwrap(),
        ["a:init", "b:init", "a:render(3)", "b:render(3)"]
    );
    assert_eq!(session.searches_executed(), 1);
}

#[test]
fn widgets_cannot_join_a_started_session() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut session = SearchSession::new("products", records());
    session.start().unwrap();

    let err = session
        .add_widget(Probe::new("late", SearchConfiguration::default(), &calls))
        .unwrap_err();
    assert!(matches!(err, SessionError::AlreadyStarted { widget: "late" }));
    assert!(matches!(session.start(), Err(SessionError::AlreadyStarted { .. })));
}

#[test]
fn run_pending_requires_a_started_session() {
    let mut session = SearchSession::new("products", records());
    assert!(matches!(session.run_pending(), Err(SessionError::NotStarted)));
    assert!(session.results().is_none());
}

#[test]
fn search_requests_are_coalesced_into_one_backend_call() {
    let backend = CountingBackend {
        inner: records(),
        ..CountingBackend::default()
    };
    let mut session = SearchSession::new("products", backend);
    let container = Arc::new(MemoryContainer::new("#brands"));
    session
        .add_widget(
            menu(MenuOptions {
                container: Some(container.clone()),
                attribute_name: "brand".into(),
                ..MenuOptions::default()
            })
            .unwrap(),
        )
        .unwrap();
    session.start().unwrap();

    let helper = session.helper().clone();
    helper.toggle_refinement("brand", "Apple");
    helper.search();
    helper.toggle_refinement("brand", "Samsung");
    helper.search();

    assert!(session.run_pending().unwrap());
    assert!(!session.run_pending().unwrap());
    assert_eq!(session.searches_executed(), 2);
    assert_eq!(*session.backend.calls.lock().unwrap(), 2);
    assert_eq!(session.results().unwrap().nb_hits, 2);
    assert_eq!(container.mounts(), 2);
}

#[test]
fn init_errors_abort_the_start() {
    let container = Arc::new(MemoryContainer::new("#sort"));
    let mut session = SearchSession::new("articles", records());
    session
        .add_widget(
            sort_by_selector(SortBySelectorOptions {
                container: Some(container.clone()),
                indices: vec![IndexOption::new("products", "Relevance")],
                auto_hide_container: false,
            })
            .unwrap(),
        )
        .unwrap();

    let err = session.start().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Configuration(ConfigurationError::UnknownIndex { .. })
    ));
    assert_eq!(container.mounts(), 0);
    assert_eq!(session.searches_executed(), 0);
}
