//! Repository provider for the domain layer

use super::administrator::AdministratorRepository;
use super::vehicle::VehicleRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let admin = repos.administrators().find_by_id(1).await?;
///     let car = repos.vehicles().find_by_id(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn administrators(&self) -> &dyn AdministratorRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
}
