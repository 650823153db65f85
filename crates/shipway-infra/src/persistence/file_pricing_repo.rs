//! File-based implementation of PricingRepository

use std::path::PathBuf;

use shipway_domain::model::PricingTable;
use shipway_domain::repository::PricingRepository;
use shipway_types::Error;

use crate::pricing_loader::PricingLoader;

/// Pricing table read from a TOML file on every load
pub struct FilePricingRepository {
    toml_path: PathBuf,
}

impl FilePricingRepository {
    pub fn new(toml_path: PathBuf) -> Self {
        Self { toml_path }
    }

    /// Get the TOML path
    pub fn toml_path(&self) -> &PathBuf {
        &self.toml_path
    }
}

impl PricingRepository for FilePricingRepository {
    fn load(&self) -> Result<PricingTable, Error> {
        Ok(PricingLoader::load_from_file(&self.toml_path)?.into_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing_loader::write_pricing_file;
    use shipway_types::VehicleType;

    #[test]
    fn test_reads_current_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing.toml");
        let mut table = PricingTable::default();
        write_pricing_file(&path, &table).unwrap();

        let repo = FilePricingRepository::new(path.clone());
        assert_eq!(repo.load().unwrap().get(VehicleType::Van).unwrap().per_km, 7000.0);

        table.vehicles[2].per_km = 7500.0;
        write_pricing_file(&path, &table).unwrap();
        assert_eq!(repo.load().unwrap().get(VehicleType::Van).unwrap().per_km, 7500.0);
    }
}
