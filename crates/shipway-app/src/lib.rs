//! Application service layer - config, quoting use cases, submission packaging

pub mod app;
pub mod config;
pub mod repository;
