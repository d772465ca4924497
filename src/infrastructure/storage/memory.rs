//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{
    Administrator, AdministratorRepository, DomainError, DomainResult, NewAdministrator,
    NewVehicle, Vehicle, VehicleQuery, VehicleRepository,
};
use crate::shared::PageRequest;

/// Administrators keyed by id, with an email index enforcing uniqueness
pub struct InMemoryAdministratorRepository {
    administrators: DashMap<i32, Administrator>,
    emails: DashMap<String, i32>,
    counter: AtomicI32,
}

impl InMemoryAdministratorRepository {
    pub fn new() -> Self {
        Self {
            administrators: DashMap::new(),
            emails: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }

    fn sorted(&self) -> Vec<Administrator> {
        let mut all: Vec<Administrator> = self
            .administrators
            .iter()
            .map(|e| e.value().clone())
            .collect();
        all.sort_by_key(|a| a.id);
        all
    }
}

impl Default for InMemoryAdministratorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdministratorRepository for InMemoryAdministratorRepository {
    async fn create(&self, dto: NewAdministrator) -> DomainResult<Administrator> {
        let slot = match self.emails.entry(dto.email.clone()) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict(format!(
                    "Administrator with email '{}'",
                    dto.email
                )))
            }
            Entry::Vacant(slot) => slot,
        };

        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        slot.insert(id);

        let administrator = Administrator {
            id,
            email: dto.email,
            password_hash: dto.password_hash,
            role: dto.role.unwrap_or_default(),
        };
        self.administrators.insert(id, administrator.clone());
        Ok(administrator)
    }

    async fn list(&self, page: PageRequest) -> DomainResult<Vec<Administrator>> {
        Ok(page.apply(self.sorted()))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Administrator>> {
        Ok(self.administrators.get(&id).map(|a| a.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Administrator>> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.administrators.len() as u64)
    }
}

/// Vehicles keyed by id
pub struct InMemoryVehicleRepository {
    vehicles: DashMap<i32, Vehicle>,
    counter: AtomicI32,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, dto: NewVehicle) -> DomainResult<Vehicle> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        let vehicle = Vehicle {
            id,
            brand: dto.brand,
            model: dto.model,
            year: dto.year,
        };
        self.vehicles.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn list(&self, query: VehicleQuery) -> DomainResult<Vec<Vehicle>> {
        let mut matching: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|e| query.matches(&e.brand, &e.model))
            .map(|e| e.value().clone())
            .collect();
        matching.sort_by_key(|v| v.id);
        Ok(query.page.apply(matching))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(&id).map(|v| v.clone()))
    }

    async fn update(&self, vehicle: &Vehicle) -> DomainResult<Vehicle> {
        match self.vehicles.get_mut(&vehicle.id) {
            Some(mut existing) => {
                *existing = vehicle.clone();
                Ok(vehicle.clone())
            }
            None => Err(DomainError::NotFound {
                entity: "Vehicle",
                id: vehicle.id,
            }),
        }
    }

    async fn delete(&self, vehicle: &Vehicle) -> DomainResult<()> {
        self.vehicles
            .remove(&vehicle.id)
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                id: vehicle.id,
            })?;
        Ok(())
    }
}

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    administrators: InMemoryAdministratorRepository,
    vehicles: InMemoryVehicleRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn administrators(&self) -> &dyn AdministratorRepository {
        &self.administrators
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[tokio::test]
    async fn administrator_email_is_unique() {
        let repo = InMemoryAdministratorRepository::new();
        let dto = NewAdministrator {
            email: "adm@fleet.io".into(),
            password_hash: "x".into(),
            role: Some(Role::Admin),
        };

        let first = repo.create(dto.clone()).await.unwrap();
        assert_eq!(first.id, 1);
        assert!(matches!(
            repo.create(dto).await,
            Err(DomainError::Conflict(_))
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(
            repo.find_by_email("adm@fleet.io").await.unwrap().unwrap().id,
            1
        );
    }

    #[tokio::test]
    async fn vehicles_are_listed_in_id_order() {
        let repo = InMemoryVehicleRepository::new();
        for i in 0..12 {
            repo.create(NewVehicle::new("Fiat", format!("M{i}"), 2000))
                .await
                .unwrap();
        }

        let page = repo
            .list(VehicleQuery {
                page: PageRequest::page(2),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<i32> = page.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[tokio::test]
    async fn update_missing_vehicle_is_not_found() {
        let repo = InMemoryVehicleRepository::new();
        let ghost = Vehicle {
            id: 9,
            brand: "Fiat".into(),
            model: "Uno".into(),
            year: 1990,
        };
        assert!(matches!(
            repo.update(&ghost).await,
            Err(DomainError::NotFound { id: 9, .. })
        ));
    }
}
