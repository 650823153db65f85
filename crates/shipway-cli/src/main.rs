//! Shipway - delivery fee quotes and order form checks
//!
//! A CLI tool that prices parcels per vehicle type and validates order forms
//! before they are submitted to the Shipway order API.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    match commands::execute(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
