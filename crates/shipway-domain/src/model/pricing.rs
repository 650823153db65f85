//! Vehicle pricing table

use serde::{Deserialize, Serialize};
use shipway_types::VehicleType;
use std::sync::LazyLock;

/// Pricing for a single vehicle type (VND)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePricing {
    pub vehicle_type: VehicleType,
    /// Flat fee per order
    pub base_fee: f64,
    /// Fee per kilometre of great-circle distance
    pub per_km: f64,
    /// Heaviest parcel the vehicle accepts (inclusive)
    pub max_weight_kg: f64,
    /// Charged per kg above the surcharge threshold; 0 for no surcharge
    #[serde(default)]
    pub weight_surcharge_per_kg: f64,
}

/// Table-wide pricing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    #[serde(default = "default_surcharge_threshold_kg")]
    pub surcharge_threshold_kg: f64,
    #[serde(default = "default_cod_fee_rate")]
    pub cod_fee_rate: f64,
    #[serde(default = "default_cod_fee_cap")]
    pub cod_fee_cap: f64,
    #[serde(default = "default_rounding_step")]
    pub rounding_step: f64,
}

fn default_surcharge_threshold_kg() -> f64 {
    50.0
}

fn default_cod_fee_rate() -> f64 {
    0.01
}

fn default_cod_fee_cap() -> f64 {
    50_000.0
}

fn default_rounding_step() -> f64 {
    1_000.0
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            surcharge_threshold_kg: default_surcharge_threshold_kg(),
            cod_fee_rate: default_cod_fee_rate(),
            cod_fee_cap: default_cod_fee_cap(),
            rounding_step: default_rounding_step(),
        }
    }
}

/// Pricing for every vehicle type plus the shared policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub policy: PricingPolicy,
    pub vehicles: Vec<VehiclePricing>,
}

/// Built-in Shipway tariff
pub static DEFAULT_PRICING: LazyLock<PricingTable> = LazyLock::new(|| PricingTable {
    policy: PricingPolicy::default(),
    vehicles: vec![
        VehiclePricing {
            vehicle_type: VehicleType::Bike,
            base_fee: 15_000.0,
            per_km: 3_000.0,
            max_weight_kg: 30.0,
            weight_surcharge_per_kg: 0.0,
        },
        VehiclePricing {
            vehicle_type: VehicleType::Car,
            base_fee: 30_000.0,
            per_km: 5_000.0,
            max_weight_kg: 300.0,
            weight_surcharge_per_kg: 500.0,
        },
        VehiclePricing {
            vehicle_type: VehicleType::Van,
            base_fee: 50_000.0,
            per_km: 7_000.0,
            max_weight_kg: 500.0,
            weight_surcharge_per_kg: 400.0,
        },
        VehiclePricing {
            vehicle_type: VehicleType::Truck500Kg,
            base_fee: 80_000.0,
            per_km: 10_000.0,
            max_weight_kg: 500.0,
            weight_surcharge_per_kg: 300.0,
        },
        VehiclePricing {
            vehicle_type: VehicleType::Truck1000Kg,
            base_fee: 120_000.0,
            per_km: 15_000.0,
            max_weight_kg: 1_000.0,
            weight_surcharge_per_kg: 200.0,
        },
    ],
});

impl Default for PricingTable {
    fn default() -> Self {
        DEFAULT_PRICING.clone()
    }
}

impl PricingTable {
    /// Look up pricing by vehicle type
    pub fn get(&self, vehicle_type: VehicleType) -> Option<&VehiclePricing> {
        self.vehicles.iter().find(|p| p.vehicle_type == vehicle_type)
    }

    /// Vehicle types that have no entry in this table
    pub fn missing_vehicles(&self) -> Vec<VehicleType> {
        VehicleType::ALL
            .into_iter()
            .filter(|v| self.get(*v).is_none())
            .collect()
    }

    /// Vehicle types listed more than once
    pub fn duplicate_vehicles(&self) -> Vec<VehicleType> {
        let mut duplicates = Vec::new();
        for v in VehicleType::ALL {
            let count = self.vehicles.iter().filter(|p| p.vehicle_type == v).count();
            if count > 1 {
                duplicates.push(v);
            }
        }
        duplicates
    }

    /// Check the table covers the closed vehicle set exactly once each and
    /// holds no negative or non-finite amounts.
    pub fn check(&self) -> Result<(), String> {
        let missing = self.missing_vehicles();
        if !missing.is_empty() {
            return Err(format!("missing pricing for: {}", join_vehicles(&missing)));
        }
        let duplicates = self.duplicate_vehicles();
        if !duplicates.is_empty() {
            return Err(format!("duplicate pricing for: {}", join_vehicles(&duplicates)));
        }
        for p in &self.vehicles {
            let amounts = [p.base_fee, p.per_km, p.max_weight_kg, p.weight_surcharge_per_kg];
            if amounts.iter().any(|a| !a.is_finite() || *a < 0.0) {
                return Err(format!("invalid amounts for {}", p.vehicle_type));
            }
        }
        let policy = &self.policy;
        let constants = [
            policy.surcharge_threshold_kg,
            policy.cod_fee_rate,
            policy.cod_fee_cap,
            policy.rounding_step,
        ];
        if constants.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err("invalid pricing policy".to_string());
        }
        Ok(())
    }
}

fn join_vehicles(vehicles: &[VehicleType]) -> String {
    vehicles
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_complete() {
        let table = PricingTable::default();
        assert!(table.check().is_ok());
        assert_eq!(table.vehicles.len(), VehicleType::ALL.len());
    }

    #[test]
    fn test_default_bike_pricing() {
        let table = PricingTable::default();
        let bike = table.get(VehicleType::Bike).unwrap();
        assert_eq!(bike.base_fee, 15_000.0);
        assert_eq!(bike.per_km, 3_000.0);
        assert_eq!(bike.max_weight_kg, 30.0);
        assert_eq!(bike.weight_surcharge_per_kg, 0.0);
    }

    #[test]
    fn test_default_surcharge_rates() {
        let table = PricingTable::default();
        let rate = |v| table.get(v).unwrap().weight_surcharge_per_kg;
        assert_eq!(rate(VehicleType::Car), 500.0);
        assert_eq!(rate(VehicleType::Van), 400.0);
        assert_eq!(rate(VehicleType::Truck500Kg), 300.0);
        assert_eq!(rate(VehicleType::Truck1000Kg), 200.0);
    }

    #[test]
    fn test_check_reports_missing_vehicle() {
        let mut table = PricingTable::default();
        table.vehicles.retain(|p| p.vehicle_type != VehicleType::Van);
        let err = table.check().unwrap_err();
        assert!(err.contains("van"));
        assert_eq!(table.missing_vehicles(), vec![VehicleType::Van]);
    }

    #[test]
    fn test_check_reports_duplicate_vehicle() {
        let mut table = PricingTable::default();
        let car = table.get(VehicleType::Car).unwrap().clone();
        table.vehicles.push(car);
        assert!(table.check().unwrap_err().contains("duplicate"));
    }

    #[test]
    fn test_check_rejects_negative_amount() {
        let mut table = PricingTable::default();
        table.vehicles[0].per_km = -1.0;
        assert!(table.check().is_err());
    }
}
