//! Shared type definitions

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle category used for pricing and weight limits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
pub enum VehicleType {
    /// Motorbike
    #[serde(rename = "bike")]
    #[value(name = "bike")]
    Bike,
    /// 4-seat car
    #[serde(rename = "car")]
    #[value(name = "car")]
    Car,
    /// 7-seat van
    #[serde(rename = "van")]
    #[value(name = "van")]
    Van,
    /// 500kg truck
    #[serde(rename = "truck_500kg")]
    #[value(name = "truck_500kg")]
    Truck500Kg,
    /// 1 tonne truck
    #[serde(rename = "truck_1000kg")]
    #[value(name = "truck_1000kg")]
    Truck1000Kg,
}

impl VehicleType {
    /// All vehicle types in declaration order
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Bike,
        VehicleType::Car,
        VehicleType::Van,
        VehicleType::Truck500Kg,
        VehicleType::Truck1000Kg,
    ];

    /// Wire name (`bike`, `truck_500kg`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Bike => "bike",
            VehicleType::Car => "car",
            VehicleType::Van => "van",
            VehicleType::Truck500Kg => "truck_500kg",
            VehicleType::Truck1000Kg => "truck_1000kg",
        }
    }

    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Bike => "Motorbike",
            VehicleType::Car => "Car (4 seats)",
            VehicleType::Van => "Van (7 seats)",
            VehicleType::Truck500Kg => "Truck 500kg",
            VehicleType::Truck1000Kg => "Truck 1 tonne",
        }
    }

    /// Whether the heavy-parcel surcharge tier applies to this vehicle.
    ///
    /// Bikes never take the surcharge branch, even though their weight
    /// limit sits below the surcharge threshold.
    pub fn has_weight_surcharge(&self) -> bool {
        !matches!(self, VehicleType::Bike)
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown vehicle type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle type: {0}")]
pub struct UnknownVehicleType(pub String);

impl FromStr for VehicleType {
    type Err = UnknownVehicleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| UnknownVehicleType(s.to_string()))
    }
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180]
    pub fn is_valid(&self) -> bool {
        is_valid_latitude(self.lat) && is_valid_longitude(self.lng)
    }
}

impl FromStr for Coordinates {
    type Err = String;

    /// Parse `"LAT,LNG"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG but got '{}'", s))?;
        let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
        let lng: f64 = lng.trim().parse().map_err(|_| format!("invalid longitude '{}'", lng.trim()))?;
        Ok(Coordinates { lat, lng })
    }
}

pub fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
}

pub fn is_valid_longitude(lng: f64) -> bool {
    (-180.0..=180.0).contains(&lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_roundtrip_names() {
        for v in VehicleType::ALL {
            assert_eq!(v.as_str().parse::<VehicleType>().unwrap(), v);
        }
        assert!("truck".parse::<VehicleType>().is_err());
        assert!("Bike".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_vehicle_type_serde_names() {
        let json = serde_json::to_string(&VehicleType::Truck500Kg).unwrap();
        assert_eq!(json, "\"truck_500kg\"");
        let v: VehicleType = serde_json::from_str("\"truck_1000kg\"").unwrap();
        assert_eq!(v, VehicleType::Truck1000Kg);
    }

    #[test]
    fn test_bike_has_no_surcharge_tier() {
        assert!(!VehicleType::Bike.has_weight_surcharge());
        assert!(VehicleType::Car.has_weight_surcharge());
        assert!(VehicleType::Truck1000Kg.has_weight_surcharge());
    }

    #[test]
    fn test_coordinates_parse() {
        let c: Coordinates = "10.7769, 106.7009".parse().unwrap();
        assert!((c.lat - 10.7769).abs() < 1e-9);
        assert!((c.lng - 106.7009).abs() < 1e-9);
        assert!("10.7769".parse::<Coordinates>().is_err());
        assert!("abc,1".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_coordinate_ranges_inclusive() {
        assert!(Coordinates::new(90.0, 180.0).is_valid());
        assert!(Coordinates::new(-90.0, -180.0).is_valid());
        assert!(!Coordinates::new(90.01, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }
}
