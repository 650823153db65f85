//! Pricing table loader from TOML configuration

use shipway_domain::model::PricingTable;
use shipway_types::{ConfigError, Error, Result};
use std::fs;
use std::path::Path;

/// Pricing table loaded from TOML and checked for completeness
#[derive(Debug)]
pub struct PricingLoader {
    table: PricingTable,
}

impl PricingLoader {
    /// Load a pricing table from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read pricing file: {}",
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load a pricing table from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let table: PricingTable = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse pricing TOML: {}",
                e
            )))
        })?;

        table
            .check()
            .map_err(|msg| Error::Config(ConfigError::ParseError(msg)))?;

        Ok(Self { table })
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    pub fn into_table(self) -> PricingTable {
        self.table
    }
}

/// Render a pricing table as TOML
pub fn to_toml_string(table: &PricingTable) -> Result<String> {
    toml::to_string_pretty(table).map_err(|e| {
        Error::Config(ConfigError::SaveError(format!(
            "Failed to serialize pricing table: {}",
            e
        )))
    })
}

/// Write a pricing table to a TOML file, creating parent directories
pub fn write_pricing_file(path: &Path, table: &PricingTable) -> Result<()> {
    let content = to_toml_string(table)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
