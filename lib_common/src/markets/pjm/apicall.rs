//! # PJM API Call Client
//!
//! This module provides the low-level retrying GET against PJM Data Miner 2.
//! It encapsulates the retry policy and the loop that applies it, handing
//! raw text responses up to the parsing layer.
//!
//! ## Core Behavior:
//! - **Bounded Retries**: Up to `max_attempts` tries per call, with
//!   exponential backoff between failed attempts (`factor * 2^attempt`
//!   seconds, no jitter).
//! - **Uniform Retry Classification**: Any transport error and any status
//!   of 400 or above counts as a retryable failure; a sub-400 status ends
//!   the loop immediately. 4xx statuses are retried exactly like 5xx ones.
//! - **Structured Logging**: Each failed attempt emits a `log` warning with
//!   the attempt counter; the final failure is wrapped into a `FeedError`
//!   carrying the last observed cause.

use std::time::Duration;

use tokio::time::sleep;

use crate::markets::pjm::error::{FeedError, FetchFailure};
use crate::retrieve::feed_http::{ApiClient, TextResponse};

/// Base address for all Data Miner 2 feeds. Feed names are appended as a
/// path segment.
pub const BASE_URL: &str = "https://dataminer2.pjm.com/feed/";

/// Retry configuration for feed requests.
///
/// Fixed per client instance; construct a new client to change it.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Maximum number of attempts per call. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Backoff base factor; the sleep after attempt `i` (0-based) is
    /// `backoff_factor * 2^i` seconds.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    /// The documented defaults: timeout 20 s, 3 attempts, factor 1.0.
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            max_attempts: 3,
            backoff_factor: 1.0,
        }
    }
}

impl RetryPolicy {
    /// The backoff delay applied after the failed attempt with the given
    /// 0-based index. Negative or non-finite factors clamp to zero.
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        let seconds = self.backoff_factor * 2f64.powi(attempt_index as i32);
        Duration::from_secs_f64(seconds.max(0.0))
    }
}

/// Performs GET requests against Data Miner 2 with bounded retries.
pub struct ApiCallPjm {
    client: ApiClient,
    policy: RetryPolicy,
}

impl ApiCallPjm {
    /// Initializes a client against the production Data Miner endpoint.
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_base_url(BASE_URL, policy)
    }

    /// Initializes a client against an alternate endpoint. Used by tests
    /// and local mirrors.
    ///
    /// # Panics
    /// Panics if `base_url` is not a valid absolute URL.
    pub fn with_base_url(base_url: &str, policy: RetryPolicy) -> Self {
        Self {
            client: ApiClient::new(base_url, policy.timeout),
            policy,
        }
    }

    /// The retry policy this client was constructed with.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Performs a GET for the named feed with retries per the policy.
    ///
    /// ## Logic:
    /// 1. Validate the feed name (must be non-empty) before any I/O.
    /// 2. Issue the GET. A response with status < 400 is returned
    ///    immediately, ending the loop.
    /// 3. A transport error or a status >= 400 is a retryable failure: if
    ///    attempts remain, sleep `backoff_factor * 2^attempt` seconds and
    ///    try again; otherwise give up and return the last failure wrapped
    ///    in a `FeedError::Fetch`.
    ///
    /// # Errors
    /// `FeedError::InvalidArgument` for an empty feed name (no request is
    /// issued); `FeedError::Fetch` once the policy is exhausted.
    pub async fn fetch_text(
        &self,
        feed_name: &str,
        params: &[(String, String)],
    ) -> Result<TextResponse, FeedError> {
        if feed_name.is_empty() {
            return Err(FeedError::InvalidArgument(
                "feed name must not be empty".to_string(),
            ));
        }

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0u32;

        loop {
            let failure: FetchFailure = match self.client.get_text(feed_name, params).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => FetchFailure::HttpStatus(response.status),
                Err(err) => FetchFailure::from(err),
            };

            log::warn!(
                "request for feed '{}' failed (attempt {}/{}): {}",
                feed_name,
                attempt + 1,
                max_attempts,
                failure
            );

            if attempt + 1 >= max_attempts {
                return Err(FeedError::Fetch {
                    feed: feed_name.to_string(),
                    source: failure,
                });
            }

            sleep(self.policy.delay_for(attempt)).await;
            attempt += 1;
        }
    }
}
