use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use facetkit::api::{ConfigurationError, Widget};
use facetkit::render::{Container, MemoryContainer, View};
use facetkit::session::{MemoryBackend, SearchSession};
use facetkit::widgets::price_ranges::Bucket;
use facetkit::widgets::{
    MenuOptions, PriceRangesOptions, RangeSliderOptions, SortBySelectorOptions, Tooltips, menu, price_ranges,
    range_slider, sort_by_selector,
};
use log::{debug, warn};

use crate::cli::{Assignment, CliArgs};
use crate::settings::{ResolvedConfig, WidgetKind, WidgetSpec};

/// Scripted user interactions, replayed in declaration order per kind.
#[derive(Debug, Default, Clone)]
pub(crate) struct Interactions {
    pub(crate) toggles: Vec<Assignment>,
    pub(crate) ranges: Vec<Assignment>,
    pub(crate) prices: Vec<Assignment>,
    pub(crate) selects: Vec<Assignment>,
}

impl Interactions {
    pub(crate) fn from_cli(cli: &CliArgs) -> Self {
        Self {
            toggles: cli.toggle.clone(),
            ranges: cli.range.clone(),
            prices: cli.price.clone(),
            selects: cli.select.clone(),
        }
    }

    fn is_empty(&self) -> bool {
        self.toggles.is_empty() && self.ranges.is_empty() && self.prices.is_empty() && self.selects.is_empty()
    }
}

/// Final view of one mounted widget.
#[derive(Debug)]
pub(crate) struct WidgetOutcome {
    pub(crate) container: String,
    pub(crate) kind: WidgetKind,
    pub(crate) view: Option<View>,
}

#[derive(Debug)]
pub(crate) struct SearchOutcome {
    pub(crate) index: String,
    pub(crate) query: String,
    pub(crate) nb_hits: usize,
    pub(crate) searches: usize,
    pub(crate) widgets: Vec<WidgetOutcome>,
}

struct Mounted {
    kind: WidgetKind,
    container: Arc<MemoryContainer>,
}

/// Coordinates building the session and replaying interactions.
pub(crate) struct SearchWorkflow {
    session: SearchSession<MemoryBackend>,
    mounted: Vec<Mounted>,
}

impl SearchWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let ResolvedConfig {
            index,
            records,
            query,
            widgets,
        } = config;

        let path = records.ok_or_else(|| anyhow!("no records file configured"))?;
        let text = fs::read_to_string(&path).with_context(|| format!("failed to read records from {}", path.display()))?;
        let backend =
            MemoryBackend::from_json(&text).with_context(|| format!("failed to load records from {}", path.display()))?;
        debug!("loaded {} records from {}", backend.len(), path.display());

        let mut session = SearchSession::new(index, backend).with_query(query);

        let mut mounted = Vec::with_capacity(widgets.len());
        for spec in widgets {
            let container = Arc::new(MemoryContainer::new(spec.container.clone()));
            let widget = build_widget(&spec, container.clone())
                .with_context(|| format!("invalid {} widget in {}", spec.kind, spec.container))?;
            session.add_boxed_widget(widget)?;
            mounted.push(Mounted {
                kind: spec.kind,
                container,
            });
        }

        Ok(Self { session, mounted })
    }

    pub(crate) fn run(mut self, interactions: &Interactions) -> Result<SearchOutcome> {
        self.session.start()?;

        if !interactions.is_empty() {
            self.replay(interactions)?;
            self.session.run_pending()?;
        }

        let state = self.session.state();
        let nb_hits = self.session.results().map_or(0, |results| results.nb_hits);
        Ok(SearchOutcome {
            index: state.index().to_string(),
            query: state.query().to_string(),
            nb_hits,
            searches: self.session.searches_executed(),
            widgets: self
                .mounted
                .iter()
                .map(|mounted| WidgetOutcome {
                    container: mounted.container.selector().to_string(),
                    kind: mounted.kind,
                    view: mounted.container.view(),
                })
                .collect(),
        })
    }

    fn replay(&self, interactions: &Interactions) -> Result<()> {
        for toggle in &interactions.toggles {
            match self.body(&toggle.container) {
                Some(View::RefinementList(props)) => props.toggle_refinement.call(toggle.value.clone()),
                other => skip("--toggle", toggle, other.as_ref()),
            }
        }
        for range in &interactions.ranges {
            let (low, high) = range.bounds().map_err(|err| anyhow!(err))?;
            match self.body(&range.container) {
                Some(View::Slider(props)) => props.on_change.call([
                    low.unwrap_or(f64::NEG_INFINITY),
                    high.unwrap_or(f64::INFINITY),
                ]),
                other => skip("--range", range, other.as_ref()),
            }
        }
        for price in &interactions.prices {
            let (from, to) = price.bounds().map_err(|err| anyhow!(err))?;
            match self.body(&price.container) {
                Some(View::PriceRanges(props)) => props.refine.call(Bucket::new(from, to)),
                other => skip("--price", price, other.as_ref()),
            }
        }
        for select in &interactions.selects {
            match self.body(&select.container) {
                Some(View::Selector(props)) => props.set_value.call(select.value.clone()),
                other => skip("--select", select, other.as_ref()),
            }
        }
        Ok(())
    }

    /// Innermost view last mounted into `selector`.
    fn body(&self, selector: &str) -> Option<View> {
        let mounted = self
            .mounted
            .iter()
            .find(|mounted| mounted.container.selector() == selector)?;
        mounted.container.view().map(|view| view.body().clone())
    }
}

fn skip(flag: &str, assignment: &Assignment, view: Option<&View>) {
    match view {
        None => warn!("{flag} {}: no widget is mounted there", assignment.container),
        Some(View::Hidden) => warn!("{flag} {}: the widget is hidden", assignment.container),
        Some(_) => warn!("{flag} {}: the widget does not accept this interaction", assignment.container),
    }
}

fn build_widget(spec: &WidgetSpec, container: Arc<MemoryContainer>) -> Result<Box<dyn Widget>, ConfigurationError> {
    let container: Arc<dyn Container> = container;
    let widget: Box<dyn Widget> = match spec.kind {
        WidgetKind::Menu => Box::new(menu(MenuOptions {
            container: Some(container),
            attribute_name: spec.attribute.clone(),
            sort_by: spec.sort_by.clone(),
            limit: spec.limit,
            show_more: spec.show_more.clone(),
            templates: spec.templates.clone(),
            transform_data: None,
            auto_hide_container: spec.auto_hide_container,
        })?),
        WidgetKind::RangeSlider => Box::new(range_slider(RangeSliderOptions {
            container: Some(container),
            attribute_name: spec.attribute.clone(),
            tooltips: Tooltips::from(spec.tooltips),
            templates: spec.templates.clone(),
            step: spec.step,
            pips: spec.pips,
            auto_hide_container: spec.auto_hide_container,
        })?),
        WidgetKind::PriceRanges => Box::new(price_ranges(PriceRangesOptions {
            container: Some(container),
            attribute_name: spec.attribute.clone(),
            currency: spec.currency.clone(),
            templates: spec.templates.clone(),
            auto_hide_container: spec.auto_hide_container,
            ..PriceRangesOptions::default()
        })?),
        WidgetKind::SortBySelector => Box::new(sort_by_selector(SortBySelectorOptions {
            container: Some(container),
            indices: spec.indices.clone(),
            auto_hide_container: spec.auto_hide_container,
        })?),
    };
    Ok(widget)
}
