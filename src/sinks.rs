//! Presentation sink capabilities, consumed rather than implemented here.
//!
//! Flows only ever talk to these traits; the host supplies the real date
//! picker, chart widget, and image layer, and tests supply recorders.

use crate::geometry::Extent;

/// The date picker the dates flow populates.
pub trait DateSelector {
    fn clear(&mut self);
    fn add_option(&mut self, label: &str, value: &str);
}

/// The chart widget the statistics flow drives. `set_series` replaces the
/// chart's data; `redraw` makes it visible.
pub trait ChartWidget {
    fn set_series(&mut self, labels: &[String], values: &[f64]);
    fn redraw(&mut self) -> anyhow::Result<()>;
}

/// The map's image layer. Setting a source replaces any prior overlay.
pub trait MapOverlay {
    fn set_overlay_source(&mut self, url: &str, extent: Extent);
}
