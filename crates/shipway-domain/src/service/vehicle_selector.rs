//! Vehicle choice by parcel weight

use shipway_types::VehicleType;

use crate::model::PricingTable;

/// Whether `vehicle_type` can carry `weight_kg`
pub fn fits(weight_kg: f64, vehicle_type: VehicleType, table: &PricingTable) -> bool {
    table
        .get(vehicle_type)
        .is_some_and(|p| weight_kg <= p.max_weight_kg)
}

/// Every vehicle that can carry the parcel, in declaration order
pub fn allowed_vehicles(weight_kg: f64, table: &PricingTable) -> Vec<VehicleType> {
    if weight_kg.is_nan() || weight_kg <= 0.0 {
        return Vec::new();
    }
    VehicleType::ALL
        .into_iter()
        .filter(|v| fits(weight_kg, *v, table))
        .collect()
}

/// Smallest vehicle (in declaration order) that can carry the parcel
pub fn suggest_vehicle(weight_kg: f64, table: &PricingTable) -> Option<VehicleType> {
    allowed_vehicles(weight_kg, table).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_by_weight() {
        let table = PricingTable::default();
        assert_eq!(suggest_vehicle(5.0, &table), Some(VehicleType::Bike));
        assert_eq!(suggest_vehicle(30.0, &table), Some(VehicleType::Bike));
        assert_eq!(suggest_vehicle(30.5, &table), Some(VehicleType::Car));
        assert_eq!(suggest_vehicle(450.0, &table), Some(VehicleType::Van));
        assert_eq!(suggest_vehicle(800.0, &table), Some(VehicleType::Truck1000Kg));
        assert_eq!(suggest_vehicle(1200.0, &table), None);
    }

    #[test]
    fn test_non_positive_weight_has_no_vehicle() {
        let table = PricingTable::default();
        assert_eq!(suggest_vehicle(0.0, &table), None);
        assert_eq!(suggest_vehicle(f64::NAN, &table), None);
    }

    #[test]
    fn test_allowed_vehicles() {
        let table = PricingTable::default();
        assert_eq!(
            allowed_vehicles(400.0, &table),
            vec![VehicleType::Van, VehicleType::Truck500Kg, VehicleType::Truck1000Kg]
        );
        assert!(fits(500.0, VehicleType::Truck500Kg, &table));
        assert!(!fits(500.5, VehicleType::Truck500Kg, &table));
    }
}
