//! fieldlens
//!
//! A lightweight Rust library for querying a field-imagery analytics
//! service from a drawn field polygon. Pairs with the `fieldlens` CLI.
//!
//! ### Features
//! - Hold a single drawn polygon and build per-flow queries from it
//! - Fetch available imagery dates, vegetation-index statistics, and
//!   rendered imagery overlays over HTTP
//! - Project responses into date options, chart series, and overlay
//!   descriptors, and push them into injected presentation sinks
//! - Render the statistics series as an SVG/PNG line chart
//! - Export series and date lists as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use fieldlens::app::App;
//! use fieldlens::geometry::Feature;
//! use fieldlens::viz::LineChartFile;
//! use fieldlens::{Client, sinks};
//!
//! struct Options(Vec<(String, String)>);
//! impl sinks::DateSelector for Options {
//!     fn clear(&mut self) { self.0.clear(); }
//!     fn add_option(&mut self, label: &str, value: &str) {
//!         self.0.push((label.into(), value.into()));
//!     }
//! }
//! struct Overlay;
//! impl sinks::MapOverlay for Overlay {
//!     fn set_overlay_source(&mut self, url: &str, _extent: fieldlens::geometry::Extent) {
//!         println!("overlay: {url}");
//!     }
//! }
//!
//! let chart = LineChartFile::new("ndvi.svg", 1000, 600, "NDVI mean");
//! let mut app = App::new(Client::default(), Options(Vec::new()), chart, Overlay);
//! app.finish_draw(Feature::from_ring(&[
//!     [73.775, 18.672], [73.774, 18.671], [73.776, 18.671], [73.775, 18.672],
//! ])?);
//! app.refresh_dates()?;
//! app.refresh_statistics("2023-09-01", "2023-10-07")?;
//! app.refresh_imagery("ndvi", "2023-10-07")?;
//! # Ok::<(), fieldlens::Error>(())
//! ```

pub mod api;
pub mod app;
pub mod error;
pub mod geometry;
pub mod models;
pub mod project;
pub mod query;
pub mod selection;
pub mod sinks;
pub mod storage;
pub mod viz;

pub use api::{AnalyticsService, Client, DEFAULT_ORIGIN};
pub use app::{App, Outcome};
pub use error::{Error, Result};
pub use geometry::{Extent, Feature};
pub use models::{DateEntry, DateOption, ImageryOverlay, StatisticsSeries};
pub use selection::SelectionStore;
