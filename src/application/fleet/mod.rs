//! Vehicle directory

pub mod service;

pub use service::VehicleService;
