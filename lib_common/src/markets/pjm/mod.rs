//! # PJM Data Miner 2 Integration Module
//!
//! This module provides a dedicated interface for fetching public feeds from
//! PJM Data Miner 2. It encapsulates the client logic and data structures
//! required to fetch, normalize, and re-encode tabular feed data.
//!
//! ## Contained Modules:
//!
//! - **`apicall`**: Implements the low-level retrying GET against the Data
//!   Miner endpoint, governed by a `RetryPolicy` (per-attempt timeout,
//!   bounded attempts, exponential backoff).
//!
//! - **`client`**: The higher-level `FeedClient`, which turns a feed name and
//!   query parameters into a normalized `DataTable`, plus the feed-specific
//!   `fetch_gen_by_fuel` convenience method.
//!
//! - **`error`**: The error taxonomy for feed operations — caller mistakes
//!   (`InvalidArgument`) versus fetch/parse failures with their root cause.
//!
//! - **`table`**: The ordered tabular data model, column-name normalization,
//!   best-effort timestamp parsing, and the three output encodings.

#![doc(html_logo_url = "https://example.com/logo.png")] // Placeholder
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Retrying GET against the Data Miner endpoint, with backoff policy.
pub mod apicall;
/// High-level feed client: fetch, parse, normalize, encode.
pub mod client;
/// Error taxonomy for feed operations.
pub mod error;
/// Ordered tabular data model and output encodings.
pub mod table;
