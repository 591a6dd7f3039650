//! # Utility Calculator Module
//!
//! Quick HVAC and energy conversions: cooling tons, Btu/h, MMBtu, and
//! natural-gas billing units (MCF, Dth). Every function here is pure
//! arithmetic over `f64` — no state, no I/O — so they compose freely.
//!
//! ## Contained Modules:
//!
//! - **`constants`**: The shared engineering constants (Btu/h per ton,
//!   Btu per MMBtu, default gas heating value).
//!
//! - **`units`**: Generic thermal-energy rate conversions (Btu/h ↔ MMBtu/h).
//!
//! - **`gas`**: Natural-gas volume/energy conversions driven by a heating
//!   value (MCF ↔ MMBtu, plus the Dth aliases).
//!
//! - **`hvac`**: Cooling-load conversions (tons ↔ Btu/h) and the composite
//!   tons → MCF/h sizing calculation.

#![doc(html_logo_url = "https://example.com/logo.png")] // Placeholder
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use thiserror::Error;

/// Shared engineering constants for utility calculations.
pub mod constants;
/// Natural gas conversions for heating value and billing units.
pub mod gas;
/// HVAC and load conversions built on standard engineering assumptions.
pub mod hvac;
/// Generic unit conversions for thermal energy.
pub mod units;

/// Errors raised by the conversion functions.
#[derive(Debug, Error)]
pub enum CalcError {
    /// A caller-supplied value violates a precondition (e.g. a
    /// non-positive efficiency).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
