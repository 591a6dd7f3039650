//! # Market Data Provider APIs Module
//!
//! This module groups together all logic and client implementations related to
//! specific grid and market data providers and their APIs. Its purpose is to
//! abstract the details of interacting with external data services, providing
//! normalized tabular data to the rest of the system.
//!
//! ## Contained Modules:
//!
//! - **`pjm`**: Contains the client implementation and tabular data model for
//!   fetching public feeds from PJM Data Miner 2. This includes the retry
//!   logic, CSV/JSON body detection, column-name normalization, and the
//!   generation-by-fuel convenience wrapper.
//!
//! By centralizing these provider-specific clients, this module ensures a clean
//! separation of concerns and facilitates easier integration of new data
//! providers in the future.

#![doc(html_logo_url = "https://example.com/logo.png")] // Placeholder
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Client for PJM Data Miner 2 public feeds, including normalization helpers.
pub mod pjm;
