//! Generic unit conversions for thermal energy.
//!
//! The functions here provide basic conversions between Btu/h and MMBtu/h
//! using the standard relationship of 1,000,000 Btu per MMBtu.

use crate::calc::constants::BTU_PER_MMBTU;

/// Converts a heat rate from Btu/h to MMBtu/h.
pub fn btuh_to_mmbtuh(btuh: f64) -> f64 {
    btuh / BTU_PER_MMBTU
}

/// Converts a heat rate from MMBtu/h to Btu/h.
pub fn mmbtuh_to_btuh(mmbtuh: f64) -> f64 {
    mmbtuh * BTU_PER_MMBTU
}
