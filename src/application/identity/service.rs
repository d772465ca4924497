//! Administrator directory service
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::info;

use super::credentials::CredentialService;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{Administrator, DomainError, DomainResult, NewAdministrator, Role};
use crate::infrastructure::crypto::password::hash_password;
use crate::shared::PageRequest;

#[derive(Clone)]
pub struct AdministratorService {
    repos: Arc<dyn RepositoryProvider>,
    credentials: CredentialService,
    bcrypt_cost: u32,
}

impl AdministratorService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, bcrypt_cost: u32) -> Self {
        Self {
            credentials: CredentialService::new(repos.clone()),
            repos,
            bcrypt_cost,
        }
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Option<Administrator>> {
        self.credentials.authenticate(email, password).await
    }

    // ── Commands ────────────────────────────────────────────────

    /// Hash the password and store a new administrator. `role` defaults to
    /// [`Role::Editor`]. A taken email is a `Conflict`.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> DomainResult<Administrator> {
        let password_hash = hash_password(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        let administrator = self
            .repos
            .administrators()
            .create(NewAdministrator {
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(
            administrator_id = administrator.id,
            role = %administrator.role,
            "Administrator created"
        );
        Ok(administrator)
    }

    /// Create the first ADMIN when the table is empty. Returns `None` when
    /// administrators already exist.
    pub async fn seed_admin(&self, email: &str, password: &str) -> DomainResult<Option<Administrator>> {
        if self.repos.administrators().count().await? > 0 {
            return Ok(None);
        }
        self.create(email, password, Some(Role::Admin)).await.map(Some)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(&self, page: PageRequest) -> DomainResult<Vec<Administrator>> {
        self.repos.administrators().list(page).await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Option<Administrator>> {
        self.repos.administrators().find_by_id(id).await
    }
}
