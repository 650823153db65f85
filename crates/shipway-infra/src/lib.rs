//! Infrastructure layer - file formats and repository implementations

pub mod image_prep;
pub mod order_loader;
pub mod persistence;
pub mod pricing_loader;
pub mod quote_csv;
