//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod administrator_repository;
pub mod repository_provider;
pub mod vehicle_repository;

pub use administrator_repository::SeaOrmAdministratorRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use vehicle_repository::SeaOrmVehicleRepository;

use sea_orm::{DbErr, SqlErr};
use tracing::error;

use crate::domain::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    error!("Database error: {}", e);
    DomainError::Persistence(e.to_string())
}

pub(crate) fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || e.to_string().contains("UNIQUE")
}
