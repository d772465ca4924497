//! # Vehicle Registry
//!
//! Administrator login and a role-gated vehicle registry over HTTP.
//!
//! ## Architecture
//!
//! - **domain**: entities, role enum, repository traits and errors
//! - **application**: validation rules, credential/token services and the
//!   administrator and vehicle directory services
//! - **infrastructure**: SeaORM persistence, in-memory repositories, JWT and
//!   bcrypt
//! - **interfaces**: axum REST API with Swagger documentation
//! - **server**: process lifecycle (database, seeding, serving, shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::{create_api_router, AppState};
