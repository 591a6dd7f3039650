//! Shared engineering constants for utility calculations.

/// Btu per hour equivalent for one ton of cooling capacity.
pub const BTUH_PER_TON: f64 = 12_000.0;

/// British thermal units contained in one million British thermal units.
pub const BTU_PER_MMBTU: f64 = 1_000_000.0;

/// Default natural gas higher heating value (MMBtu) per thousand cubic feet
/// (MCF). This follows the Philadelphia Gas Works convention where
/// 1 MCF is roughly 1.035 MMBtu.
pub const HEATING_VALUE_MMBTU_PER_MCF: f64 = 1.035;
