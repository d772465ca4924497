//! Application layer - use-case services and payload rules

pub mod fleet;
pub mod identity;
pub mod validation;

pub use fleet::VehicleService;
pub use identity::{AdministratorService, CredentialService, IssuedToken, TokenIssuer};
pub use validation::{
    validate_administrator, validate_vehicle, AdministratorPayload, Rules, VehiclePayload,
};
