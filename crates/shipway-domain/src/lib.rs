//! Shipway domain layer
//!
//! Order forms, the pricing table, and the pure services that validate and
//! price an order. Nothing in this crate performs I/O or logs.

pub mod model;
pub mod repository;
pub mod service;
