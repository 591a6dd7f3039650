//! Error taxonomy for PJM feed operations.
//!
//! Two categories exist: `InvalidArgument`, raised before any I/O when the
//! caller violates a precondition, and `Fetch`, raised when the feed could
//! not be retrieved or its body could not be parsed. `Fetch` always carries
//! the root cause as a `FetchFailure`.

use thiserror::Error;

use crate::retrieve::feed_http::RetrieveError;

/// Errors surfaced by the PJM feed client.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A caller-supplied value violates a precondition (unknown output
    /// format name, inverted or unparseable date range). Never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The feed could not be fetched or its response body could not be
    /// parsed. Wraps the last observed root cause.
    #[error("failed to fetch feed '{feed}'")]
    Fetch {
        /// Name of the feed whose retrieval failed.
        feed: String,
        /// The root cause of the failure.
        #[source]
        source: FetchFailure,
    },
}

impl FeedError {
    /// Wraps a root cause into a `Fetch` error for the given feed.
    pub(crate) fn fetch(feed: &str, source: impl Into<FetchFailure>) -> Self {
        Self::Fetch {
            feed: feed.to_string(),
            source: source.into(),
        }
    }
}

/// Root causes for a failed fetch.
///
/// Transport errors and disqualifying statuses are retried by the caller's
/// policy before surfacing here; parse failures are terminal immediately.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The GET itself failed (URL construction or network level).
    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    /// The endpoint answered with a disqualifying status code.
    #[error("HTTP {0} from feed endpoint")]
    HttpStatus(u16),

    /// The response body claimed to be CSV but could not be read as such.
    #[error("unable to parse CSV response: {0}")]
    Csv(#[from] csv::Error),

    /// The response body could not be decoded as JSON.
    #[error("unable to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
