use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{Administrator, DomainResult};
use crate::infrastructure::crypto::password::verify_password;

/// Checks an email/password pair against stored administrators.
#[derive(Clone)]
pub struct CredentialService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CredentialService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// `Some` only when both the email and the password match a record.
    /// Unknown email and wrong password are indistinguishable to callers.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<Administrator>> {
        let Some(administrator) = self.repos.administrators().find_by_email(email).await? else {
            debug!(email, "Login for unknown email");
            return Ok(None);
        };

        if !verify_password(password, &administrator.password_hash) {
            warn!(administrator_id = administrator.id, "Password mismatch");
            return Ok(None);
        }

        Ok(Some(administrator))
    }
}
