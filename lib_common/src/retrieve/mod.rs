//! # Data Retrieval Module
//!
//! This module provides a centralized location for generic data retrieval
//! clients and utilities, primarily focused on HTTP-based interactions.
//!
//! ## Purpose:
//! The goal of the `retrieve` module is to offer a consistent and robust way
//! to fetch data from external services, encapsulating common concerns such
//! as HTTP request building, query-string handling, and error classification.
//! This prevents duplication of networking logic across different API clients.
//!
//! ## Contained Modules:
//!
//! - **`feed_http`**: A generic text-oriented HTTP `ApiClient` built on
//!   `reqwest`. It returns the raw status code, content-type hint, and body
//!   text of a response, leaving parsing and retry decisions to the caller.
//!   It serves as the foundation for feed-specific clients (e.g., PJM).
//!
//! By using the components within this module, other parts of the system
//! can focus on data parsing and business logic, delegating the complexities
//! of network communication to this layer.

#![doc(html_logo_url = "https://example.com/logo.png")] // Placeholder
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Generic text-oriented HTTP GET client for tabular data feeds.
pub mod feed_http;
