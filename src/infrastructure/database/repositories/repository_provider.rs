//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{AdministratorRepository, VehicleRepository};

use super::administrator_repository::SeaOrmAdministratorRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let admin = repos.administrators().find_by_email("adm@fleet.io").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    administrators: SeaOrmAdministratorRepository,
    vehicles: SeaOrmVehicleRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            administrators: SeaOrmAdministratorRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            db,
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn administrators(&self) -> &dyn AdministratorRepository {
        &self.administrators
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }
}
