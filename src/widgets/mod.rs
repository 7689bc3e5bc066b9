//! Concrete search widgets and the facet helpers they share.

pub mod facet_values;
pub mod menu;
pub mod price_ranges;
pub mod range;
pub mod range_slider;
pub mod show_more;
pub mod sort_by_selector;

#[cfg(test)]
mod test_support;

pub use facet_values::facet_values;
pub use menu::{Menu, MenuOptions, menu};
pub use price_ranges::{PriceRanges, PriceRangesOptions, price_ranges};
pub use range::RangeBounds;
pub use range_slider::{RangeSlider, RangeSliderOptions, Tooltips, range_slider};
pub use show_more::{ShowMore, ShowMoreConfig};
pub use sort_by_selector::{IndexOption, SortBySelector, SortBySelectorOptions, sort_by_selector};
