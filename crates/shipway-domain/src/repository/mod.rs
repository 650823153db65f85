//! Repository trait definitions

use crate::model::PricingTable;
use shipway_types::Error;

/// Source of the active pricing table
pub trait PricingRepository {
    /// Load the full pricing table
    fn load(&self) -> Result<PricingTable, Error>;
}

/// The built-in tariff
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinPricingRepository;

impl PricingRepository for BuiltinPricingRepository {
    fn load(&self) -> Result<PricingTable, Error> {
        Ok(PricingTable::default())
    }
}
