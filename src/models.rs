use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};
use crate::geometry::Extent;

/// Decode a response body in two stages so the failure modes stay distinct:
/// a body that is not JSON at all is a [`Error::Decode`], while valid JSON
/// missing an expected field is a [`Error::MalformedResponse`].
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(Error::Decode)?;
    serde_json::from_value(value).map_err(|e| Error::MalformedResponse(e.to_string()))
}

/// One element of the `/dates/` response.
///
/// The service writes the cloud-cover key with a space in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateEntry {
    pub date: String,
    #[serde(rename = "cloud cover", default, skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,
}

/// `/ndvi-stats/` response envelope. The nesting mirrors the Statistical
/// API payload the service forwards verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsResponse {
    pub stats: Vec<StatsBlock>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsBlock {
    pub data: Vec<StatsSample>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsSample {
    pub interval: Interval,
    pub outputs: Outputs,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interval {
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Outputs {
    pub data: OutputData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputData {
    pub bands: Bands,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bands {
    #[serde(rename = "B0")]
    pub b0: Band,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Band {
    pub stats: BandStats,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BandStats {
    pub mean: f64,
}

/// `/imagery/` response: a server-relative path to the rendered image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageryResponse {
    pub path: String,
}

/// A selectable imagery date, as surfaced in the date picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateOption {
    pub label: String,
    pub value: String,
}

/// Ordered chart input: parallel label/value sequences, in response order.
/// Order is passed through from the service, not re-sorted locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl StatisticsSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A static image overlay: absolute URL plus the extent it covers, in map
/// coordinates. Replaces any prior overlay on the image layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageryOverlay {
    pub url: String,
    pub extent: Extent,
}
