//! Domain services

pub mod distance;
pub mod fee_estimator;
pub mod order_validator;
pub mod vehicle_selector;

pub use distance::haversine_km;
pub use fee_estimator::{
    estimate_fee, estimate_preview, CodInput, FeeBreakdown, FeeError, FeeQuery,
};
pub use order_validator::{
    is_valid_phone, parse_order, validate, FieldError, FieldViolation, ValidationResult,
};
pub use vehicle_selector::{allowed_vehicles, fits, suggest_vehicle};
