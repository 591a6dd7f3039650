//! HVAC and load conversions built on standard engineering assumptions.

use crate::calc::constants::BTUH_PER_TON;
use crate::calc::gas::mmbtu_to_mcf;
use crate::calc::units::btuh_to_mmbtuh;
use crate::calc::CalcError;

/// Converts cooling capacity in tons to Btu/h.
///
/// Assumes the industry standard 1 ton = 12,000 Btu/h.
pub fn tons_to_btuh(tons: f64) -> f64 {
    tons * BTUH_PER_TON
}

/// Converts Btu/h to cooling tons using 1 ton = 12,000 Btu/h.
pub fn btuh_to_tons(btuh: f64) -> f64 {
    btuh / BTUH_PER_TON
}

/// Calculates the required natural gas flow (MCF/h) to serve a cooling load.
///
/// The cooling load in tons is converted to Btu/h, then to MMBtu/h, scaled
/// by equipment efficiency, and finally converted to thousand cubic feet
/// per hour using the provided gas heating value.
///
/// # Arguments
/// * `tons` - Cooling capacity in tons.
/// * `eff` - Thermal efficiency as a fraction (1.0 is 100% efficient).
/// * `hv_mmbtu_per_mcf` - Gas heating value in MMBtu per MCF.
///
/// # Errors
/// Returns `CalcError::InvalidArgument` when `eff` is not positive.
pub fn tons_to_mcf_per_hr(tons: f64, eff: f64, hv_mmbtu_per_mcf: f64) -> Result<f64, CalcError> {
    if eff <= 0.0 {
        return Err(CalcError::InvalidArgument(
            "efficiency must be greater than zero".to_string(),
        ));
    }

    let btuh_required = tons_to_btuh(tons);
    let mmbtuh_required = btuh_to_mmbtuh(btuh_required);
    let input_mmbtuh = mmbtuh_required / eff;
    Ok(mmbtu_to_mcf(input_mmbtuh, hv_mmbtu_per_mcf))
}
