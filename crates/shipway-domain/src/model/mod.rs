//! Domain model types

pub mod image;
pub mod location;
pub mod order;
pub mod pricing;

pub use image::{ImageSet, ProductImage, MAX_IMAGES};
pub use location::LocationInfo;
pub use order::{FieldKind, FormField, OrderForm, OrderInput, ProductInfo};
pub use pricing::{PricingPolicy, PricingTable, VehiclePricing};
