//! Application state and the three user-triggered flows.
//!
//! Replaces page-global widget state with one explicit struct: the remote
//! service, the single-slot selection, the three presentation sinks, and a
//! request generation per flow. Flows are independent; each builds its
//! query (failing fast with `NoSelection` before any network call), fetches,
//! projects, and applies the result to exactly one sink. If a newer request
//! of the same flow was issued in the meantime, the stale result is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::AnalyticsService;
use crate::error::{Error, Result};
use crate::geometry::Feature;
use crate::models::{DateEntry, ImageryOverlay, StatisticsSeries};
use crate::project;
use crate::query;
use crate::selection::SelectionStore;
use crate::sinks::{ChartWidget, DateSelector, MapOverlay};

/// Monotonic request generation for one flow. Only the result carrying the
/// latest issued token may touch the flow's sink.
#[derive(Debug, Default)]
struct Generation(AtomicU64);

impl Generation {
    fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

/// Whether a fetched result reached its sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Applied to the sink; carries the number of elements applied.
    Applied(usize),
    /// A newer request of the same flow was issued first; sink untouched.
    Superseded,
}

pub struct App<S, D, C, M>
where
    S: AnalyticsService,
    D: DateSelector,
    C: ChartWidget,
    M: MapOverlay,
{
    pub service: S,
    pub selection: SelectionStore,
    pub dates: D,
    pub chart: C,
    pub map: M,
    dates_gen: Generation,
    stats_gen: Generation,
    imagery_gen: Generation,
}

impl<S, D, C, M> App<S, D, C, M>
where
    S: AnalyticsService,
    D: DateSelector,
    C: ChartWidget,
    M: MapOverlay,
{
    pub fn new(service: S, dates: D, chart: C, map: M) -> Self {
        Self {
            service,
            selection: SelectionStore::new(),
            dates,
            chart,
            map,
            dates_gen: Generation::default(),
            stats_gen: Generation::default(),
            imagery_gen: Generation::default(),
        }
    }

    /// Draw-start hook: the selection is discarded unconditionally.
    pub fn begin_draw(&mut self) {
        self.selection.begin_draw();
    }

    /// Draw-end hook: the completed polygon becomes the selection.
    pub fn finish_draw(&mut self, feature: Feature) {
        self.selection.finish_draw(feature);
    }

    /// Whether an unload gate should prompt: a drawn polygon would be lost.
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Issue a new dates request token, superseding any in-flight one.
    /// `refresh_dates` does this itself; hosts running the fetch elsewhere
    /// pair this with [`App::apply_dates`].
    pub fn begin_dates(&self) -> u64 {
        self.dates_gen.begin()
    }

    pub fn begin_statistics(&self) -> u64 {
        self.stats_gen.begin()
    }

    pub fn begin_imagery(&self) -> u64 {
        self.imagery_gen.begin()
    }

    /// Fetch the available imagery dates for the selection and repopulate
    /// the date selector.
    pub fn refresh_dates(&mut self) -> Result<Outcome> {
        let q = query::dates_query(&self.selection)?;
        let token = self.begin_dates();
        let entries = self.service.fetch_available_dates(&q)?;
        Ok(self.apply_dates(token, &entries))
    }

    /// Apply a dates result if `token` is still the latest.
    pub fn apply_dates(&mut self, token: u64, entries: &[DateEntry]) -> Outcome {
        if !self.dates_gen.is_current(token) {
            log::debug!("dates result superseded, dropping {} entries", entries.len());
            return Outcome::Superseded;
        }
        let options = project::date_options(entries);
        self.dates.clear();
        for option in &options {
            self.dates.add_option(&option.label, &option.value);
        }
        log::info!("date selector populated with {} options", options.len());
        Outcome::Applied(options.len())
    }

    /// Fetch index statistics over `[start_date, end_date]` and redraw the
    /// chart with the projected series.
    pub fn refresh_statistics(&mut self, start_date: &str, end_date: &str) -> Result<Outcome> {
        let q = query::stats_query(&self.selection, start_date, end_date)?;
        let token = self.begin_statistics();
        let response = self.service.fetch_statistics(&q)?;
        let series = project::statistics_series(&response)?;
        self.apply_statistics(token, &series)
    }

    /// Apply a statistics series if `token` is still the latest.
    pub fn apply_statistics(&mut self, token: u64, series: &StatisticsSeries) -> Result<Outcome> {
        if !self.stats_gen.is_current(token) {
            log::debug!("statistics result superseded, dropping {} samples", series.len());
            return Ok(Outcome::Superseded);
        }
        self.chart.set_series(&series.labels, &series.values);
        self.chart.redraw().map_err(Error::Sink)?;
        log::info!("chart redrawn with {} samples", series.len());
        Ok(Outcome::Applied(series.len()))
    }

    /// Fetch a rendered index image for `date` and replace the map overlay.
    /// The overlay extent is the selection's extent at query-build time.
    pub fn refresh_imagery(&mut self, index: &str, date: &str) -> Result<Outcome> {
        let q = query::imagery_query(&self.selection, index, date)?;
        let token = self.begin_imagery();
        let response = self.service.fetch_imagery(&q)?;
        let overlay = project::imagery_overlay(&response, self.service.origin(), q.extent);
        Ok(self.apply_imagery(token, &overlay))
    }

    /// Apply an imagery overlay if `token` is still the latest.
    pub fn apply_imagery(&mut self, token: u64, overlay: &ImageryOverlay) -> Outcome {
        if !self.imagery_gen.is_current(token) {
            log::debug!("imagery result superseded, dropping {}", overlay.url);
            return Outcome::Superseded;
        }
        self.map.set_overlay_source(&overlay.url, overlay.extent);
        log::info!("overlay source set to {}", overlay.url);
        Outcome::Applied(1)
    }
}
