use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::models::{DateEntry, StatisticsSeries};

/// Save a statistics series as CSV with header, one row per sample.
pub fn save_series_csv<P: AsRef<Path>>(series: &StatisticsSeries, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("interval_from", "mean"))?;
    for (label, value) in series.labels.iter().zip(&series.values) {
        wtr.serialize((label, value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a statistics series as pretty JSON.
pub fn save_series_json<P: AsRef<Path>>(series: &StatisticsSeries, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(series)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save available-dates entries as CSV with header.
pub fn save_dates_csv<P: AsRef<Path>>(entries: &[DateEntry], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("date", "cloud_cover"))?;
    for e in entries {
        wtr.serialize((&e.date, e.cloud_cover))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save available-dates entries as pretty JSON.
pub fn save_dates_json<P: AsRef<Path>>(entries: &[DateEntry], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(entries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
