use async_trait::async_trait;

use super::{NewVehicle, Vehicle, VehicleQuery};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> DomainResult<Vehicle>;

    /// Filtered, then paginated, ordered by id.
    async fn list(&self, query: VehicleQuery) -> DomainResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;

    /// Full replace of brand/model/year. The row must exist.
    async fn update(&self, vehicle: &Vehicle) -> DomainResult<Vehicle>;
    async fn delete(&self, vehicle: &Vehicle) -> DomainResult<()>;
}
