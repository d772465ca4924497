use tracing::debug;

use crate::domain::{Administrator, DomainError, DomainResult};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig, TokenClaims};

/// Signed token handed out after a successful login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Issues and verifies bearer tokens with one signing key.
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    config: JwtConfig,
}

impl TokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn issue(&self, administrator: &Administrator) -> DomainResult<IssuedToken> {
        let token = create_token(administrator, &self.config)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(IssuedToken {
            token,
            token_type: "Bearer",
            expires_in: self.config.expires_in_seconds(),
        })
    }

    pub fn verify(&self, token: &str) -> DomainResult<TokenClaims> {
        verify_token(token, &self.config).map_err(|e| {
            debug!("Token rejected: {}", e);
            DomainError::Unauthorized("Invalid or expired token".into())
        })
    }
}
