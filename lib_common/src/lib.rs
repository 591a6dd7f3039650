// Declare the modules to re-export
pub mod calc;    // Unit conversions for HVAC loads and natural gas billing units
pub mod markets; // Market data provider clients (PJM Data Miner 2)
pub mod retrieve; // Generic HTTP retrieval plumbing

// Re-export everything
pub use calc::CalcError;
pub use calc::constants::*;
pub use calc::gas::*;
pub use calc::hvac::*;
pub use calc::units::*;
pub use markets::pjm::apicall::*;
pub use markets::pjm::client::*;
pub use markets::pjm::error::*;
pub use markets::pjm::table::*;
pub use retrieve::feed_http::*;
