//! Administrator aggregate
//!
//! Contains the Administrator entity, its role enum, the create DTO and
//! the repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use model::{Administrator, Role, UnknownRole};

pub use dto_create::NewAdministrator;

pub use repository::AdministratorRepository;
