use async_trait::async_trait;

use super::{Administrator, NewAdministrator};
use crate::domain::DomainResult;
use crate::shared::PageRequest;

#[async_trait]
pub trait AdministratorRepository: Send + Sync {
    async fn create(&self, dto: NewAdministrator) -> DomainResult<Administrator>;

    /// Ordered by id. `PageRequest::all()` returns every row.
    async fn list(&self, page: PageRequest) -> DomainResult<Vec<Administrator>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Administrator>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Administrator>>;
    async fn count(&self) -> DomainResult<u64>;
}
