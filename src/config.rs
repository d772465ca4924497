//! Application configuration
//!
//! Loaded from a TOML file (see [`default_config_path`]), then overridden by
//! `DATABASE_URL` and `JWT_SECRET` from the environment. Every section and
//! field is optional in the file; missing values take the defaults below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! shutdown_timeout = 30
//!
//! [database]
//! url = "sqlite://./vehicle_registry.db?mode=rwc"
//!
//! [security]
//! jwt_secret = "at-least-32-bytes-of-random-secret"
//! jwt_expiration_hours = 24
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [admin]
//! email = "administrador@email.com"
//! password = "change-me"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::crypto::password::DEFAULT_COST;
use crate::infrastructure::database::{DatabaseConfig, DEFAULT_DATABASE_URL};

pub const MIN_JWT_SECRET_LEN: usize = 32;

const APP_DIR: &str = "vehicle-registry";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// `<config_dir>/vehicle-registry/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    /// Seeds the first ADMIN when the administrators table is empty
    pub admin: Option<AdminSeedConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to drain in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub sqlx_logging: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: defaults.max_connections,
            min_connections: defaults.min_connections,
            sqlx_logging: defaults.sqlx_logging,
        }
    }
}

impl From<&DatabaseSettings> for DatabaseConfig {
    fn from(s: &DatabaseSettings) -> Self {
        DatabaseConfig {
            url: s.url.clone(),
            max_connections: s.max_connections,
            min_connections: s.min_connections,
            sqlx_logging: s.sqlx_logging,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// HMAC-SHA-256 signing key. Required; there is no built-in fallback.
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expiration_hours: 24,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl SecurityConfig {
    pub fn jwt_config(&self) -> Result<JwtConfig, ConfigError> {
        let secret = self
            .jwt_secret
            .clone()
            .ok_or_else(|| ConfigError::Invalid("security.jwt_secret is not set".into()))?;
        Ok(JwtConfig::new(secret, self.jwt_expiration_hours))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// `plain` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AdminSeedConfig {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AppConfig {
    /// Load `path` and apply environment overrides. A missing file yields
    /// the defaults (plus environment).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `DATABASE_URL` and `JWT_SECRET` from `lookup`. Empty values are
    /// ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = Some(secret);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.security.jwt_secret.as_deref() {
            None => {
                return Err(ConfigError::Invalid(
                    "security.jwt_secret is not set (or set JWT_SECRET)".into(),
                ))
            }
            Some(secret) if secret.len() < MIN_JWT_SECRET_LEN => {
                return Err(ConfigError::Invalid(format!(
                    "security.jwt_secret must be at least {} bytes",
                    MIN_JWT_SECRET_LEN
                )))
            }
            Some(_) => {}
        }

        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "security.bcrypt_cost must be between 4 and 31".into(),
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url is empty".into()));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "database.min_connections exceeds max_connections".into(),
            ));
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "plain" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be \"plain\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        if let Some(admin) = &self.admin {
            if admin.email.trim().is_empty() || admin.password.is_empty() {
                return Err(ConfigError::Invalid(
                    "admin.email and admin.password must both be set".into(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn valid() -> AppConfig {
        let mut config = AppConfig::default();
        config.security.jwt_secret = Some(SECRET.to_string());
        config
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.security.jwt_expiration_hours, 24);
        assert!(config.security.jwt_secret.is_none());
        assert!(config.admin.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [logging]
            format = "json"

            [admin]
            email = "root@fleet.io"
            password = "pw"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.admin.unwrap().email, "root@fleet.io");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nport = "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "JWT_SECRET" => Some(SECRET.to_string()),
            _ => None,
        });

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.security.jwt_secret.as_deref(), Some(SECRET));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert!(config.security.jwt_secret.is_none());
    }

    #[test]
    fn missing_or_short_secret_is_rejected() {
        assert!(AppConfig::default().validate().is_err());

        let mut config = valid();
        config.security.jwt_secret = Some("short".into());
        assert!(config.validate().is_err());

        assert!(valid().validate().is_ok());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut config = valid();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn jwt_config_requires_secret() {
        assert!(AppConfig::default().security.jwt_config().is_err());
        let jwt = valid().security.jwt_config().unwrap();
        assert_eq!(jwt.expiration_hours, 24);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/vehicle-registry.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", valid());
        assert!(!rendered.contains(SECRET));
    }
}
