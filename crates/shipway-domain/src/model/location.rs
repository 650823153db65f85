//! Pickup / dropoff location

use serde::{Deserialize, Serialize};
use shipway_types::Coordinates;

/// Location information for pickup or dropoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// Full street address
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub contact_name: String,
    pub contact_phone: String,
    /// Note for the driver at this stop
    #[serde(default)]
    pub note: Option<String>,
}

impl LocationInfo {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}
