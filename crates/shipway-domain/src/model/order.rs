//! Order form and order input types

use serde::{Deserialize, Serialize};
use shipway_types::VehicleType;

use super::LocationInfo;

/// Raw order form as typed by the user.
///
/// Every field is kept as text so validation can tell an empty field from a
/// malformed one. Missing keys deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub pickup_address: String,
    pub pickup_lat: String,
    pub pickup_lng: String,
    pub pickup_contact_name: String,
    pub pickup_contact_phone: String,
    pub pickup_note: String,
    pub dropoff_address: String,
    pub dropoff_lat: String,
    pub dropoff_lng: String,
    pub dropoff_contact_name: String,
    pub dropoff_contact_phone: String,
    pub dropoff_note: String,
    pub product_name: String,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub vehicle_type: String,
    pub note: String,
    pub cod_amount: String,
}

/// How a form field is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Latitude,
    Longitude,
    Phone,
    /// Strictly positive number (weight, dimensions)
    Numeric,
    Vehicle,
    /// Non-negative money amount
    Amount,
}

/// Order form fields in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    PickupAddress,
    PickupLat,
    PickupLng,
    PickupContactName,
    PickupContactPhone,
    PickupNote,
    DropoffAddress,
    DropoffLat,
    DropoffLng,
    DropoffContactName,
    DropoffContactPhone,
    DropoffNote,
    ProductName,
    Weight,
    Length,
    Width,
    Height,
    VehicleType,
    Note,
    CodAmount,
}

impl FormField {
    pub const ALL: [FormField; 20] = [
        FormField::PickupAddress,
        FormField::PickupLat,
        FormField::PickupLng,
        FormField::PickupContactName,
        FormField::PickupContactPhone,
        FormField::PickupNote,
        FormField::DropoffAddress,
        FormField::DropoffLat,
        FormField::DropoffLng,
        FormField::DropoffContactName,
        FormField::DropoffContactPhone,
        FormField::DropoffNote,
        FormField::ProductName,
        FormField::Weight,
        FormField::Length,
        FormField::Width,
        FormField::Height,
        FormField::VehicleType,
        FormField::Note,
        FormField::CodAmount,
    ];

    /// Form field name
    pub fn name(&self) -> &'static str {
        match self {
            FormField::PickupAddress => "pickup_address",
            FormField::PickupLat => "pickup_lat",
            FormField::PickupLng => "pickup_lng",
            FormField::PickupContactName => "pickup_contact_name",
            FormField::PickupContactPhone => "pickup_contact_phone",
            FormField::PickupNote => "pickup_note",
            FormField::DropoffAddress => "dropoff_address",
            FormField::DropoffLat => "dropoff_lat",
            FormField::DropoffLng => "dropoff_lng",
            FormField::DropoffContactName => "dropoff_contact_name",
            FormField::DropoffContactPhone => "dropoff_contact_phone",
            FormField::DropoffNote => "dropoff_note",
            FormField::ProductName => "product_name",
            FormField::Weight => "weight",
            FormField::Length => "length",
            FormField::Width => "width",
            FormField::Height => "height",
            FormField::VehicleType => "vehicle_type",
            FormField::Note => "note",
            FormField::CodAmount => "cod_amount",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FormField::PickupLat | FormField::DropoffLat => FieldKind::Latitude,
            FormField::PickupLng | FormField::DropoffLng => FieldKind::Longitude,
            FormField::PickupContactPhone | FormField::DropoffContactPhone => FieldKind::Phone,
            FormField::Weight | FormField::Length | FormField::Width | FormField::Height => {
                FieldKind::Numeric
            }
            FormField::VehicleType => FieldKind::Vehicle,
            FormField::CodAmount => FieldKind::Amount,
            _ => FieldKind::Text,
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            FormField::PickupNote
                | FormField::DropoffNote
                | FormField::Length
                | FormField::Width
                | FormField::Height
                | FormField::Note
                | FormField::CodAmount
        )
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl OrderForm {
    /// Raw value of a field
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::PickupAddress => &self.pickup_address,
            FormField::PickupLat => &self.pickup_lat,
            FormField::PickupLng => &self.pickup_lng,
            FormField::PickupContactName => &self.pickup_contact_name,
            FormField::PickupContactPhone => &self.pickup_contact_phone,
            FormField::PickupNote => &self.pickup_note,
            FormField::DropoffAddress => &self.dropoff_address,
            FormField::DropoffLat => &self.dropoff_lat,
            FormField::DropoffLng => &self.dropoff_lng,
            FormField::DropoffContactName => &self.dropoff_contact_name,
            FormField::DropoffContactPhone => &self.dropoff_contact_phone,
            FormField::DropoffNote => &self.dropoff_note,
            FormField::ProductName => &self.product_name,
            FormField::Weight => &self.weight,
            FormField::Length => &self.length,
            FormField::Width => &self.width,
            FormField::Height => &self.height,
            FormField::VehicleType => &self.vehicle_type,
            FormField::Note => &self.note,
            FormField::CodAmount => &self.cod_amount,
        }
    }

    /// Parsed number in a field, `None` when empty or malformed
    pub fn number(&self, field: FormField) -> Option<f64> {
        parse_number(self.value(field))
    }

    /// COD amount, 0 when empty or malformed
    pub fn cod_amount_or_zero(&self) -> f64 {
        parse_amount(&self.cod_amount).unwrap_or(0.0)
    }
}

/// Parse a whole trimmed string as a finite number.
///
/// `NaN` and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a money amount, dropping `.` thousands separators (`1.000.000`).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let digits: String = raw.trim().chars().filter(|c| *c != '.').collect();
    parse_number(&digits)
}

/// Product being shipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub weight_kg: f64,
    #[serde(default)]
    pub length_cm: Option<f64>,
    #[serde(default)]
    pub width_cm: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
}

/// Validated, typed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    pub pickup: LocationInfo,
    pub dropoff: LocationInfo,
    pub product: ProductInfo,
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub cod_amount: f64,
    #[serde(default)]
    pub note: Option<String>,
}
