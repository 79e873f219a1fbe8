//! Filterable dashboard over the analytical table.
//!
//! [`build_view`] filters and aggregates rows into a [`DashboardView`];
//! [`html::render`] turns that into a standalone page.

pub mod color;
pub mod error;
pub mod filter;
pub mod html;
pub mod options;
pub mod stats;
pub mod view;

pub use color::{Palette, adjust_color};
pub use error::DashboardError;
pub use filter::{FilterSelection, Toggle};
pub use options::FilterOptions;
pub use stats::Count;
pub use view::{BarChart, CountryMap, DEFAULT_TOP_N, DashboardView, build_view};
