//! Synchronous client for the field analytics service.
//!
//! Three GET endpoints against a fixed origin (`/dates/`, `/ndvi-stats/`,
//! `/imagery/`), query parameters URL-encoded from the [`crate::query`]
//! value objects, JSON bodies decoded through [`crate::models::decode`] so
//! transport, syntax, and shape failures stay distinct.
//!
//! The observed service applies no retries; the client still carries an
//! (empty by default) backoff schedule so hosts can opt in for transient
//! 5xx failures.
//!
//! Typical usage:
//! ```no_run
//! # use fieldlens::{Client, SelectionStore, geometry::Feature, query};
//! # use fieldlens::api::AnalyticsService;
//! let client = Client::default();
//! let mut store = SelectionStore::new();
//! store.finish_draw(Feature::from_ring(&[
//!     [73.775, 18.672], [73.774, 18.671], [73.776, 18.671], [73.775, 18.672],
//! ])?);
//! let dates = client.fetch_available_dates(&query::dates_query(&store)?)?;
//! # Ok::<(), fieldlens::Error>(())
//! ```

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;

use crate::error::{Error, Result};
use crate::models::{self, DateEntry, ImageryResponse, StatsResponse};
use crate::query::{DatesQuery, ImageryQuery, StatsQuery};

/// Default service origin, matching the development deployment.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";

/// The three lookup operations, as a seam so hosts and tests can substitute
/// a fake for the HTTP client.
pub trait AnalyticsService {
    /// Dates with imagery available for the polygon. An empty array is an
    /// empty result set, not an error.
    fn fetch_available_dates(&self, query: &DatesQuery) -> Result<Vec<DateEntry>>;

    /// Index statistics over a date range, in the service's nested shape.
    fn fetch_statistics(&self, query: &StatsQuery) -> Result<StatsResponse>;

    /// A rendered index image for one date; the response carries a
    /// server-relative path.
    fn fetch_imagery(&self, query: &ImageryQuery) -> Result<ImageryResponse>;

    /// Origin the imagery path is joined to when building an overlay URL.
    fn origin(&self) -> &str;
}

// Keep -, _, . unescaped; everything else in a query value gets encoded,
// including the {}":, of JSON-stringified geometry.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(value: &str) -> String {
    utf8_percent_encode(value, SAFE).to_string()
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
    /// Backoff schedule for retrying 5xx/transport failures. Empty means a
    /// single attempt, the observed behavior.
    retry_backoff_ms: Vec<u64>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("fieldlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            retry_backoff_ms: Vec::new(),
        }
    }

    /// Opt in to retrying transient failures with the given backoff steps.
    pub fn with_retry_backoff(mut self, backoff_ms: impl Into<Vec<u64>>) -> Self {
        self.retry_backoff_ms = backoff_ms.into();
        self
    }

    /// GET a URL and return the raw body, retrying per the backoff schedule
    /// on transport errors and 5xx responses. Non-5xx failures surface
    /// immediately.
    fn get_body(&self, url: &str) -> Result<String> {
        let mut attempt = 0usize;
        loop {
            log::debug!("GET {url} (attempt {})", attempt + 1);
            let outcome = match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.text().map_err(Error::Network);
                }
                Ok(r) if r.status().is_server_error() => Err(Error::Http(r.status())),
                Ok(r) => return Err(Error::Http(r.status())),
                Err(e) => Err(Error::Network(e)),
            };
            match self.retry_backoff_ms.get(attempt) {
                Some(backoff) => {
                    log::debug!("retrying after {backoff}ms");
                    std::thread::sleep(Duration::from_millis(*backoff));
                    attempt += 1;
                }
                None => return outcome,
            }
        }
    }
}

impl AnalyticsService for Client {
    fn fetch_available_dates(&self, query: &DatesQuery) -> Result<Vec<DateEntry>> {
        let url = format!("{}/dates/?polygon={}", self.base_url, enc(&query.polygon));
        let body = self.get_body(&url)?;
        models::decode(&body)
    }

    fn fetch_statistics(&self, query: &StatsQuery) -> Result<StatsResponse> {
        let url = format!(
            "{}/ndvi-stats/?polygon={}&start_date={}&end_date={}",
            self.base_url,
            enc(&query.polygon),
            enc(&query.start_date),
            enc(&query.end_date)
        );
        let body = self.get_body(&url)?;
        models::decode(&body)
    }

    fn fetch_imagery(&self, query: &ImageryQuery) -> Result<ImageryResponse> {
        let url = format!(
            "{}/imagery/?bbox={}&polygon={}&index={}&date={}",
            self.base_url,
            enc(&query.bbox),
            enc(&query.polygon),
            enc(&query.index),
            enc(&query.date)
        );
        let body = self.get_body(&url)?;
        models::decode(&body)
    }

    fn origin(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_percent_encoded() {
        assert_eq!(enc("2023-10-07"), "2023-10-07");
        assert_eq!(
            enc(r#"{"type":"Polygon"}"#),
            "%7B%22type%22%3A%22Polygon%22%7D"
        );
        assert_eq!(enc("[1.5,2.0]"), "%5B1.5%2C2.0%5D");
    }

    #[test]
    fn trailing_slash_is_stripped_from_origin() {
        let client = Client::new("http://analytics.local:8000/");
        assert_eq!(client.origin(), "http://analytics.local:8000");
    }
}
