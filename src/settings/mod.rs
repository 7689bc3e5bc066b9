//! Configuration loading and resolution utilities.
//!
//! `load` layers the default configuration files, `--config` files,
//! `FACETKIT__*` environment variables and CLI overrides, then returns a
//! validated [`ResolvedConfig`] describing the records and widget layout.

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{ResolvedConfig, WidgetKind, WidgetSpec};
