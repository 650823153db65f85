//! CLI definition using clap

use clap::{Parser, Subcommand};
use shipway_domain::model::order::parse_amount;
use shipway_types::{Coordinates, OutputFormat, VehicleType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shipway")]
#[command(version)]
#[command(about = "Shipping fee quotes and order form checks for Shipway deliveries")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Pricing table (TOML) for this run. Uses config value if not specified.
    #[arg(long, global = true)]
    pub pricing: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the shipping fee for a parcel
    Quote {
        /// Pickup coordinates as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        pickup: Coordinates,

        /// Dropoff coordinates as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        dropoff: Coordinates,

        /// Parcel weight in kg
        #[arg(long, short = 'w')]
        weight: f64,

        /// Vehicle type. Suggested from the weight if not specified.
        #[arg(long)]
        vehicle: Option<VehicleType>,

        /// Cash-on-delivery amount (VND, "1.000.000" accepted)
        #[arg(long, value_parser = parse_cod, default_value = "0")]
        cod: f64,
    },

    /// Validate an order form (JSON) and preview its fee
    Validate {
        /// Path to order form JSON
        order: PathBuf,
    },

    /// Validate, price, and package an order for submission
    Prepare {
        /// Path to order form JSON
        order: PathBuf,

        /// Product image (repeatable, up to 5)
        #[arg(long = "image", short = 'i')]
        images: Vec<PathBuf>,

        /// Output file for the submission envelope. Prints to stdout if not specified.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Quote every row of a CSV file
    Batch {
        /// Path to quote request CSV
        csv: PathBuf,

        /// Output file for JSON results
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Suggest a vehicle for a parcel weight
    Suggest {
        /// Parcel weight in kg
        weight: f64,
    },

    /// Show the active pricing table
    Pricing {
        /// Write the active table to a TOML file as a starting point
        #[arg(long)]
        init: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// Set pricing table file
        #[arg(long)]
        set_pricing: Option<PathBuf>,

        /// Go back to the built-in pricing table
        #[arg(long)]
        clear_pricing: bool,

        /// Set order API base URL
        #[arg(long)]
        set_api_base: Option<String>,

        /// Set default log level (error, warn, info, debug, trace)
        #[arg(long)]
        set_log_level: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

fn parse_cod(raw: &str) -> Result<f64, String> {
    match parse_amount(raw) {
        Some(v) if v >= 0.0 => Ok(v),
        _ => Err(format!("invalid COD amount '{}'", raw)),
    }
}
