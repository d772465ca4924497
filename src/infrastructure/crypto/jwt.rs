//! JWT token issuing and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{Administrator, Role};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens (HMAC-SHA-256)
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    pub fn expires_in_seconds(&self) -> i64 {
        self.expiration_hours * 3600
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// JWT claims
///
/// The role is carried twice: `role` for this service and `roles`, the
/// array form other JWT consumers look for.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (administrator id)
    pub sub: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl TokenClaims {
    pub fn new(administrator: &Administrator, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);
        let role = administrator.role.as_str().to_string();

        Self {
            sub: administrator.id.to_string(),
            email: administrator.email.clone(),
            roles: vec![role.clone()],
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Role from either claim; the custom claim wins when both parse.
    pub fn resolved_role(&self) -> Option<Role> {
        self.role
            .parse()
            .ok()
            .or_else(|| self.roles.iter().find_map(|r| r.parse().ok()))
    }

    pub fn administrator_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// Create a signed token for an authenticated administrator
pub fn create_token(
    administrator: &Administrator,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(administrator, config);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry. Issuer and audience are not checked.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    validation.leeway = 0;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret-that-is-at-least-32-bytes-long", 24)
    }

    fn admin() -> Administrator {
        Administrator {
            id: 1,
            email: "adm@test.com".into(),
            password_hash: String::new(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let token = create_token(&admin(), &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "adm@test.com");
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.roles, vec!["ADMIN".to_string()]);
        assert_eq!(claims.resolved_role(), Some(Role::Admin));
        assert!(claims.exp > Utc::now().timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token("invalid-token", &config());
        assert!(result.is_err());
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let token = create_token(&admin(), &config()).unwrap();
        let other = JwtConfig::new("a-completely-different-signing-secret!!", 24);
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = JwtConfig::new(config().secret, -1);
        let token = create_token(&admin(), &expired).unwrap();
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn role_falls_back_to_array_claim() {
        let claims = TokenClaims {
            sub: "2".into(),
            email: "ed@test.com".into(),
            role: String::new(),
            roles: vec!["EDITOR".into()],
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.resolved_role(), Some(Role::Editor));
    }
}
