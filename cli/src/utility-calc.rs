use anyhow::Result;
use clap::{Parser, Subcommand};
use lib_common::calc::constants::HEATING_VALUE_MMBTU_PER_MCF;
use lib_common::calc::gas::{dth_to_mcf, mcf_to_dth, mcf_to_mmbtu, mmbtu_to_mcf};
use lib_common::calc::hvac::{btuh_to_tons, tons_to_btuh, tons_to_mcf_per_hr};
use lib_common::calc::units::{btuh_to_mmbtuh, mmbtuh_to_btuh};

/// Simple command line interface for common utility-engineering conversions.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "UtilityCalculator CLI",
    long_about = "Exposes each HVAC/gas unit conversion as a subcommand and prints the \
numeric result to standard output."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert tons to Btu/h
    TonsToBtuh {
        /// Input value for the conversion
        value: f64,
    },
    /// Convert Btu/h to tons
    BtuhToTons {
        /// Input value for the conversion
        value: f64,
    },
    /// Convert Btu/h to MMBtu/h
    BtuhToMmbtuh {
        /// Input value for the conversion
        value: f64,
    },
    /// Convert MMBtu/h to Btu/h
    MmbtuhToBtuh {
        /// Input value for the conversion
        value: f64,
    },
    /// Convert MCF to MMBtu
    McfToMmbtu {
        /// Input value for the conversion
        value: f64,
        /// Heating value in MMBtu/MCF (default matches PGW convention)
        #[arg(long, default_value_t = HEATING_VALUE_MMBTU_PER_MCF)]
        hv: f64,
    },
    /// Convert MMBtu to MCF
    MmbtuToMcf {
        /// Input value for the conversion
        value: f64,
        /// Heating value in MMBtu/MCF (default matches PGW convention)
        #[arg(long, default_value_t = HEATING_VALUE_MMBTU_PER_MCF)]
        hv: f64,
    },
    /// Convert MCF to Dth
    McfToDth {
        /// Input value for the conversion
        value: f64,
        /// Heating value in MMBtu/MCF (default matches PGW convention)
        #[arg(long, default_value_t = HEATING_VALUE_MMBTU_PER_MCF)]
        hv: f64,
    },
    /// Convert Dth to MCF
    DthToMcf {
        /// Input value for the conversion
        value: f64,
        /// Heating value in MMBtu/MCF (default matches PGW convention)
        #[arg(long, default_value_t = HEATING_VALUE_MMBTU_PER_MCF)]
        hv: f64,
    },
    /// Convert cooling load in tons to required MCF/h
    TonsToMcf {
        /// Cooling load in tons
        tons: f64,
        /// Thermal efficiency fraction
        #[arg(long, default_value_t = 1.0)]
        eff: f64,
        /// Heating value in MMBtu/MCF (default matches PGW convention)
        #[arg(long, default_value_t = HEATING_VALUE_MMBTU_PER_MCF)]
        hv: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Command::TonsToBtuh { value } => tons_to_btuh(value),
        Command::BtuhToTons { value } => btuh_to_tons(value),
        Command::BtuhToMmbtuh { value } => btuh_to_mmbtuh(value),
        Command::MmbtuhToBtuh { value } => mmbtuh_to_btuh(value),
        Command::McfToMmbtu { value, hv } => mcf_to_mmbtu(value, hv),
        Command::MmbtuToMcf { value, hv } => mmbtu_to_mcf(value, hv),
        Command::McfToDth { value, hv } => mcf_to_dth(value, hv),
        Command::DthToMcf { value, hv } => dth_to_mcf(value, hv),
        Command::TonsToMcf { tons, eff, hv } => tons_to_mcf_per_hr(tons, eff, hv)?,
    };

    println!("{result}");
    Ok(())
}
