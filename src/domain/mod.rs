//! Domain layer - entities, repository traits and errors

pub mod administrator;
pub mod error;
pub mod repositories;
pub mod vehicle;

pub use administrator::{Administrator, AdministratorRepository, NewAdministrator, Role, UnknownRole};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use vehicle::{NewVehicle, Vehicle, VehicleQuery, VehicleRepository};
