//! Pure reshaping of service responses into the forms the presentation
//! sinks consume. No I/O here.

use crate::error::{Error, Result};
use crate::geometry::Extent;
use crate::models::{DateEntry, DateOption, ImageryOverlay, ImageryResponse, StatisticsSeries, StatsResponse};

/// One option per response element, label equal to value equal to the date.
pub fn date_options(entries: &[DateEntry]) -> Vec<DateOption> {
    entries
        .iter()
        .map(|e| DateOption {
            label: e.date.clone(),
            value: e.date.clone(),
        })
        .collect()
}

/// Parallel label/value sequences from the first stats block, preserving
/// response order. An empty `stats` array means the expected path
/// `stats[0].data` is absent, which is a malformed response, not an empty
/// series.
pub fn statistics_series(response: &StatsResponse) -> Result<StatisticsSeries> {
    let block = response
        .stats
        .first()
        .ok_or_else(|| Error::MalformedResponse("stats[0] is missing".into()))?;
    let mut series = StatisticsSeries::default();
    for sample in &block.data {
        series.labels.push(sample.interval.from.clone());
        series.values.push(sample.outputs.data.bands.b0.stats.mean);
    }
    Ok(series)
}

/// Join the server-relative imagery path to the service origin and pair it
/// with the extent captured when the query was built.
pub fn imagery_overlay(response: &ImageryResponse, origin: &str, extent: Extent) -> ImageryOverlay {
    let url = format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        response.path.trim_start_matches('/')
    );
    ImageryOverlay { url, extent }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_url_joins_with_a_single_slash() {
        let extent = Extent {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1.0,
            max_y: 1.0,
        };
        let resp = ImageryResponse {
            path: "imagery/out_1.png".into(),
        };
        let overlay = imagery_overlay(&resp, "http://127.0.0.1:8000", extent);
        assert_eq!(overlay.url, "http://127.0.0.1:8000/imagery/out_1.png");

        let resp = ImageryResponse {
            path: "/imagery/out_1.png".into(),
        };
        let overlay = imagery_overlay(&resp, "http://127.0.0.1:8000/", extent);
        assert_eq!(overlay.url, "http://127.0.0.1:8000/imagery/out_1.png");
    }

    #[test]
    fn empty_stats_array_is_malformed() {
        let resp = StatsResponse { stats: vec![] };
        assert!(matches!(
            statistics_series(&resp),
            Err(Error::MalformedResponse(_))
        ));
    }
}
