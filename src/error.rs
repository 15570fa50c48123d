use thiserror::Error;

/// Failure taxonomy for the query pipeline.
///
/// Every flow surfaces its failure to the caller; nothing here is fatal to
/// the process and the three flows fail independently.
#[derive(Debug, Error)]
pub enum Error {
    /// A flow was triggered with no drawn polygon in the selection store.
    #[error("no field polygon selected")]
    NoSelection,

    /// Transport-level failure (connect, TLS, timeout, DNS).
    #[error("network error")]
    Network(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("request failed with HTTP {0}")]
    Http(reqwest::StatusCode),

    /// The response body was not valid JSON.
    #[error("response body is not valid JSON")]
    Decode(#[source] serde_json::Error),

    /// The body was valid JSON but an expected field or path was missing.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Input geometry could not be read as a polygon.
    #[error("unsupported geometry: {0}")]
    Geometry(String),

    /// A presentation sink failed while applying a result.
    #[error("presentation sink failed: {0}")]
    Sink(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
