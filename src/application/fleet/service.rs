//! Vehicle directory service
//!
//! Validation is the caller's job; this layer only orchestrates the
//! repository and logs mutations.

use std::sync::Arc;

use tracing::info;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainResult, NewVehicle, Vehicle, VehicleQuery};

#[derive(Clone)]
pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, vehicle: NewVehicle) -> DomainResult<Vehicle> {
        let created = self.repos.vehicles().create(vehicle).await?;
        info!(vehicle_id = created.id, brand = %created.brand, "Vehicle created");
        Ok(created)
    }

    pub async fn list(&self, query: VehicleQuery) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        self.repos.vehicles().find_by_id(id).await
    }

    pub async fn update(&self, vehicle: &Vehicle) -> DomainResult<Vehicle> {
        let updated = self.repos.vehicles().update(vehicle).await?;
        info!(vehicle_id = updated.id, "Vehicle updated");
        Ok(updated)
    }

    pub async fn delete(&self, vehicle: &Vehicle) -> DomainResult<()> {
        self.repos.vehicles().delete(vehicle).await?;
        info!(vehicle_id = vehicle.id, "Vehicle deleted");
        Ok(())
    }
}
