//! Render a statistics series as a line chart, to **SVG** or **PNG**
//! (chosen by file extension). Also provides [`LineChartFile`], the
//! file-backed [`ChartWidget`] used by the CLI.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::{Path, PathBuf};
use std::sync::Once;

use crate::models::StatisticsSeries;
use crate::sinks::ChartWidget;

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../assets/DejaVuSans.ttf"),
        );
    });
}

/// Plot the series as a single line over sample index, with the interval
/// start dates as x tick labels. Response order is kept as-is.
pub fn plot_series<P: AsRef<Path>>(
    series: &StatisticsSeries,
    out_path: P,
    width: u32,
    height: u32,
    caption: &str,
) -> Result<()> {
    if series.is_empty() {
        return Err(anyhow!("no data to plot"));
    }

    ensure_fonts_registered();

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    let max_x = (series.len() as i32 - 1).max(1);

    let (mut min_val, mut max_val) = (
        series.values.iter().cloned().fold(f64::INFINITY, f64::min),
        series
            .values
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max),
    );
    if (max_val - min_val).abs() < f64::EPSILON {
        min_val -= 0.1;
        max_val += 0.1;
    }

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, series, max_x, min_val, max_val, caption)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, series, max_x, min_val, max_val, caption)?;
    }

    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    series: &StatisticsSeries,
    max_x: i32,
    min_val: f64,
    max_val: f64,
    caption: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(0..max_x, min_val..max_val)
        .map_err(|e| anyhow!("{:?}", e))?;

    // X ticks show the interval start date for the sample at that index;
    // labels carry a full timestamp, keep the date part only.
    let labels = &series.labels;
    let x_label_fmt = |i: &i32| {
        labels
            .get(*i as usize)
            .map(|l| l.split('T').next().unwrap_or(l).to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&|v: &f64| format!("{v:.2}"))
        .x_labels(series.len().min(8))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .draw_series(LineSeries::new(
            series
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as i32, *v)),
            &RGBColor(75, 192, 192),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// A [`ChartWidget`] that re-renders the chart file on every redraw.
pub struct LineChartFile {
    path: PathBuf,
    width: u32,
    height: u32,
    caption: String,
    series: StatisticsSeries,
}

impl LineChartFile {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32, caption: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            caption: caption.into(),
            series: StatisticsSeries::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartWidget for LineChartFile {
    fn set_series(&mut self, labels: &[String], values: &[f64]) {
        self.series = StatisticsSeries {
            labels: labels.to_vec(),
            values: values.to_vec(),
        };
    }

    fn redraw(&mut self) -> Result<()> {
        plot_series(
            &self.series,
            &self.path,
            self.width,
            self.height,
            &self.caption,
        )
    }
}
