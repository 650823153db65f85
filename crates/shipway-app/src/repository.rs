//! Repository adapters for the pricing table

use shipway_domain::model::PricingTable;
use shipway_domain::repository::{BuiltinPricingRepository, PricingRepository};
use shipway_infra::persistence::FilePricingRepository;
use shipway_types::Result;

use crate::config::Config;

/// Open the pricing repository selected by the config
pub fn open_pricing_repo(config: &Config) -> Box<dyn PricingRepository> {
    match &config.pricing_file {
        Some(path) => Box::new(FilePricingRepository::new(path.clone())),
        None => Box::new(BuiltinPricingRepository),
    }
}

/// Load the active pricing table
pub fn load_pricing(config: &Config) -> Result<PricingTable> {
    let table = open_pricing_repo(config).load()?;
    match &config.pricing_file {
        Some(path) => tracing::debug!(path = %path.display(), "loaded pricing table"),
        None => tracing::debug!("using built-in pricing table"),
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipway_infra::pricing_loader::write_pricing_file;
    use shipway_types::VehicleType;

    #[test]
    fn test_builtin_without_override() {
        let table = load_pricing(&Config::default()).unwrap();
        assert_eq!(table, PricingTable::default());
    }

    #[test]
    fn test_file_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing.toml");
        let mut table = PricingTable::default();
        table.policy.cod_fee_cap = 25_000.0;
        write_pricing_file(&path, &table).unwrap();

        let config = Config {
            pricing_file: Some(path),
            ..Config::default()
        };
        let loaded = load_pricing(&config).unwrap();
        assert_eq!(loaded.policy.cod_fee_cap, 25_000.0);
        assert!(loaded.get(VehicleType::Truck1000Kg).is_some());
    }

    #[test]
    fn test_missing_override_file_is_error() {
        let config = Config {
            pricing_file: Some("/nonexistent/pricing.toml".into()),
            ..Config::default()
        };
        assert!(load_pricing(&config).is_err());
    }
}
