//! Natural gas conversions for heating value and billing units.
//!
//! A heating value (MMBtu per MCF) drives the volume/energy conversions;
//! callers without a metered value use
//! [`HEATING_VALUE_MMBTU_PER_MCF`](crate::calc::constants::HEATING_VALUE_MMBTU_PER_MCF).

use crate::calc::constants::HEATING_VALUE_MMBTU_PER_MCF;

/// Converts thousand cubic feet (MCF) of natural gas to MMBtu using the
/// given heating value.
pub fn mcf_to_mmbtu(mcf: f64, hv_mmbtu_per_mcf: f64) -> f64 {
    mcf * hv_mmbtu_per_mcf
}

/// Converts MMBtu to the required MCF using the given heating value.
pub fn mmbtu_to_mcf(mmbtu: f64, hv_mmbtu_per_mcf: f64) -> f64 {
    mmbtu / hv_mmbtu_per_mcf
}

/// Converts MCF to dekatherms (Dth).
///
/// Because 1 Dth is defined as 1 MMBtu, this is the same calculation as
/// [`mcf_to_mmbtu`].
pub fn mcf_to_dth(mcf: f64, hv_mmbtu_per_mcf: f64) -> f64 {
    mcf_to_mmbtu(mcf, hv_mmbtu_per_mcf)
}

/// Converts dekatherms (Dth) to MCF.
pub fn dth_to_mcf(dth: f64, hv_mmbtu_per_mcf: f64) -> f64 {
    mmbtu_to_mcf(dth, hv_mmbtu_per_mcf)
}
