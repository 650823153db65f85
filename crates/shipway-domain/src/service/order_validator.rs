//! Order form validation
//!
//! Every field is checked independently and all violations are reported
//! together, in field declaration order.

use regex::Regex;
use serde::{Deserialize, Serialize};
use shipway_types::{is_valid_latitude, is_valid_longitude, VehicleType};
use std::sync::LazyLock;
use thiserror::Error;

use crate::model::order::{parse_amount, parse_number};
use crate::model::{FieldKind, FormField, LocationInfo, OrderForm, OrderInput, ProductInfo};

/// `0` or `+84` prefix, then 9-10 digits
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0|\+84)[0-9]{9,10}$").expect("valid phone pattern"));

/// A single field problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Value must be greater than zero")]
    MustBePositive,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid latitude (-90 to 90)")]
    InvalidLatitude,

    #[error("Invalid longitude (-180 to 180)")]
    InvalidLongitude,

    #[error("Unknown vehicle type")]
    UnknownVehicleType,

    #[error("Invalid amount")]
    InvalidAmount,
}

/// A field together with what is wrong with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: FormField,
    pub error: FieldError,
}

/// Complete validation report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<FieldViolation>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// First invalid field, for focusing the form
    pub fn first_invalid(&self) -> Option<FormField> {
        self.errors.first().map(|v| v.field)
    }

    /// Errors for a single field
    pub fn errors_for(&self, field: FormField) -> Vec<FieldError> {
        self.errors
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.error)
            .collect()
    }
}

/// Vietnamese phone number check (`0912345678`, `+84912345678`)
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Validate every field of the form.
pub fn validate(form: &OrderForm) -> ValidationResult {
    let mut errors = Vec::new();

    for field in FormField::ALL {
        let raw = form.value(field).trim();
        if raw.is_empty() {
            if field.is_required() {
                errors.push(FieldViolation {
                    field,
                    error: FieldError::Required,
                });
            }
            continue;
        }

        if let Some(error) = check_value(field.kind(), raw) {
            errors.push(FieldViolation { field, error });
        }
    }

    ValidationResult::from_errors(errors)
}

fn check_value(kind: FieldKind, raw: &str) -> Option<FieldError> {
    match kind {
        FieldKind::Text => None,
        FieldKind::Numeric => match parse_number(raw) {
            None => Some(FieldError::NotANumber),
            Some(v) if v <= 0.0 => Some(FieldError::MustBePositive),
            Some(_) => None,
        },
        FieldKind::Phone => (!is_valid_phone(raw)).then_some(FieldError::InvalidPhone),
        FieldKind::Latitude => match parse_number(raw) {
            Some(lat) if is_valid_latitude(lat) => None,
            _ => Some(FieldError::InvalidLatitude),
        },
        FieldKind::Longitude => match parse_number(raw) {
            Some(lng) if is_valid_longitude(lng) => None,
            _ => Some(FieldError::InvalidLongitude),
        },
        FieldKind::Vehicle => raw
            .parse::<VehicleType>()
            .err()
            .map(|_| FieldError::UnknownVehicleType),
        FieldKind::Amount => match parse_amount(raw) {
            Some(v) if v >= 0.0 => None,
            _ => Some(FieldError::InvalidAmount),
        },
    }
}

/// Validate the form and convert it into a typed order.
pub fn parse_order(form: &OrderForm) -> Result<OrderInput, ValidationResult> {
    let report = validate(form);
    if !report.valid {
        return Err(report);
    }
    build_input(form).ok_or(report)
}

fn build_input(form: &OrderForm) -> Option<OrderInput> {
    let pickup = LocationInfo {
        address: form.pickup_address.trim().to_string(),
        lat: form.number(FormField::PickupLat)?,
        lng: form.number(FormField::PickupLng)?,
        contact_name: form.pickup_contact_name.trim().to_string(),
        contact_phone: form.pickup_contact_phone.trim().to_string(),
        note: optional_text(&form.pickup_note),
    };
    let dropoff = LocationInfo {
        address: form.dropoff_address.trim().to_string(),
        lat: form.number(FormField::DropoffLat)?,
        lng: form.number(FormField::DropoffLng)?,
        contact_name: form.dropoff_contact_name.trim().to_string(),
        contact_phone: form.dropoff_contact_phone.trim().to_string(),
        note: optional_text(&form.dropoff_note),
    };
    let product = ProductInfo {
        name: form.product_name.trim().to_string(),
        weight_kg: form.number(FormField::Weight)?,
        length_cm: form.number(FormField::Length),
        width_cm: form.number(FormField::Width),
        height_cm: form.number(FormField::Height),
    };

    Some(OrderInput {
        pickup,
        dropoff,
        product,
        vehicle_type: form.vehicle_type.parse().ok()?,
        cod_amount: form.cod_amount_or_zero(),
        note: optional_text(&form.note),
    })
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
