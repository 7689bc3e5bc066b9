//! View data handed from widgets to the presentation layer.
//!
//! Widgets never draw anything themselves: they build props, pass them through
//! a [`ViewFactory`] (optionally wrapped by the decorators in [`decorators`]) and
//! mount the resulting [`View`] into their [`Container`].

pub mod container;
pub mod decorators;
pub mod templates;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::widgets::menu::RefinementListProps;
use crate::widgets::price_ranges::PriceRangesProps;
use crate::widgets::range_slider::SliderProps;
use crate::widgets::sort_by_selector::SelectorProps;

pub use container::{Container, MemoryContainer};
pub use decorators::{ViewFactory, auto_hide_container, header_footer, view_factory};
pub use templates::{TemplateProps, TransformData, prepare_template_props};

/// Callback invoked by a view on user interaction.
pub struct Callback<T>(Arc<dyn Fn(T) + Send + Sync>);

impl<T> Callback<T> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    pub fn call(&self, argument: T) {
        (self.0)(argument);
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Props shared by every widget view, consumed by the decorators.
pub trait ViewProps {
    fn should_auto_hide_container(&self) -> bool;

    fn template_props(&self) -> &TemplateProps;
}

/// Header and footer framing a widget body.
#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub body: Box<View>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

/// Rendered output of a widget.
///
/// Serializing a view yields its data without callbacks, which is what two
/// renders are compared on.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// The container should not be displayed.
    Hidden,
    Panel(Panel),
    RefinementList(RefinementListProps),
    Slider(SliderProps),
    PriceRanges(PriceRangesProps),
    Selector(SelectorProps),
}

impl View {
    pub fn is_hidden(&self) -> bool {
        matches!(self, View::Hidden)
    }

    /// The innermost widget view, looking through panels.
    pub fn body(&self) -> &View {
        match self {
            View::Panel(panel) => panel.body.body(),
            other => other,
        }
    }
}
