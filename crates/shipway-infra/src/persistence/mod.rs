//! Repository implementations

mod file_pricing_repo;

pub use file_pricing_repo::FilePricingRepository;
