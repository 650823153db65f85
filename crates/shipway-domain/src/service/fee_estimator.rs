//! Shipping fee estimation
//!
//! Fee = base fee + distance × per-km rate, plus a per-kg surcharge above the
//! weight threshold and a capped COD handling fee, rounded up to the
//! table's rounding step.

use serde::{Deserialize, Serialize};
use shipway_types::{Coordinates, VehicleType};
use thiserror::Error;

use super::distance::haversine_km;
use crate::model::order::parse_amount;
use crate::model::{FormField, OrderForm, PricingTable};

/// Why a fee could not be produced
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeError {
    /// Not every pricing input is present and well-formed yet
    #[error("Enter all fields to compute the fee")]
    IncompleteInput,

    /// Parcel is heavier than the vehicle accepts
    #[error("Weight exceeds the {limit}kg limit for this vehicle")]
    WeightLimitExceeded { limit: f64 },
}

/// Fee estimate with its components (VND)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub vehicle_type: VehicleType,
    pub distance_km: f64,
    pub base_fee: f64,
    pub distance_fee: f64,
    pub weight_surcharge: f64,
    pub cod_fee: f64,
    /// Rounded shipping fee
    pub shipping_fee: f64,
    /// Shipping fee plus the COD amount collected from the recipient
    pub total_amount: f64,
}

impl FeeBreakdown {
    /// The rounded fee charged to the sender
    pub fn fee(&self) -> f64 {
        self.shipping_fee
    }
}

/// Estimate the shipping fee for a single parcel.
pub fn estimate_fee(
    pickup: Coordinates,
    dropoff: Coordinates,
    weight_kg: f64,
    vehicle_type: VehicleType,
    cod_amount: f64,
    table: &PricingTable,
) -> Result<FeeBreakdown, FeeError> {
    if !pickup.is_valid()
        || !dropoff.is_valid()
        || !weight_kg.is_finite()
        || weight_kg <= 0.0
        || !cod_amount.is_finite()
        || cod_amount < 0.0
    {
        return Err(FeeError::IncompleteInput);
    }

    let pricing = table.get(vehicle_type).ok_or(FeeError::IncompleteInput)?;
    if weight_kg > pricing.max_weight_kg {
        return Err(FeeError::WeightLimitExceeded {
            limit: pricing.max_weight_kg,
        });
    }

    let policy = &table.policy;
    let distance_km = haversine_km(pickup, dropoff);
    let distance_fee = distance_km * pricing.per_km;

    let weight_surcharge =
        if vehicle_type.has_weight_surcharge() && weight_kg > policy.surcharge_threshold_kg {
            (weight_kg - policy.surcharge_threshold_kg) * pricing.weight_surcharge_per_kg
        } else {
            0.0
        };

    let cod_fee = if cod_amount > 0.0 {
        (cod_amount * policy.cod_fee_rate).min(policy.cod_fee_cap)
    } else {
        0.0
    };

    let raw_fee = pricing.base_fee + distance_fee + weight_surcharge + cod_fee;
    let shipping_fee = round_up(raw_fee, policy.rounding_step);

    Ok(FeeBreakdown {
        vehicle_type,
        distance_km,
        base_fee: pricing.base_fee,
        distance_fee,
        weight_surcharge,
        cod_fee,
        shipping_fee,
        total_amount: shipping_fee + cod_amount,
    })
}

fn round_up(amount: f64, step: f64) -> f64 {
    if step > 0.0 {
        (amount / step).ceil() * step
    } else {
        amount
    }
}

/// Cash-on-delivery amount as entered
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "amount", rename_all = "snake_case")]
pub enum CodInput {
    /// Left blank: no COD
    #[default]
    Empty,
    Amount(f64),
    /// Text that is not an amount; the fee cannot be priced
    Malformed,
}

impl CodInput {
    /// Read raw COD text, accepting `.` thousands separators.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Empty;
        }
        match parse_amount(raw) {
            Some(v) => Self::Amount(v),
            None => Self::Malformed,
        }
    }
}

/// Partially filled pricing inputs, as a live preview sees them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeQuery {
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    pub weight_kg: Option<f64>,
    pub vehicle_type: Option<VehicleType>,
    #[serde(default)]
    pub cod_amount: CodInput,
}

impl FeeQuery {
    /// Read pricing inputs from a raw form; malformed values count as missing
    pub fn from_form(form: &OrderForm) -> Self {
        Self {
            pickup_lat: form.number(FormField::PickupLat),
            pickup_lng: form.number(FormField::PickupLng),
            dropoff_lat: form.number(FormField::DropoffLat),
            dropoff_lng: form.number(FormField::DropoffLng),
            weight_kg: form.number(FormField::Weight),
            vehicle_type: form.vehicle_type.parse().ok(),
            cod_amount: CodInput::parse(&form.cod_amount),
        }
    }
}

/// Estimate from partial inputs; anything missing yields `IncompleteInput`.
pub fn estimate_preview(query: &FeeQuery, table: &PricingTable) -> Result<FeeBreakdown, FeeError> {
    let (
        Some(pickup_lat),
        Some(pickup_lng),
        Some(dropoff_lat),
        Some(dropoff_lng),
        Some(weight_kg),
        Some(vehicle_type),
    ) = (
        query.pickup_lat,
        query.pickup_lng,
        query.dropoff_lat,
        query.dropoff_lng,
        query.weight_kg,
        query.vehicle_type,
    )
    else {
        return Err(FeeError::IncompleteInput);
    };
    let cod_amount = match query.cod_amount {
        CodInput::Empty => 0.0,
        CodInput::Amount(v) => v,
        CodInput::Malformed => return Err(FeeError::IncompleteInput),
    };

    estimate_fee(
        Coordinates::new(pickup_lat, pickup_lng),
        Coordinates::new(dropoff_lat, dropoff_lng),
        weight_kg,
        vehicle_type,
        cod_amount,
        table,
    )
}
