//! Administrator identity: credentials, tokens and the directory service

pub mod credentials;
pub mod service;
pub mod tokens;

pub use credentials::CredentialService;
pub use service::AdministratorService;
pub use tokens::{IssuedToken, TokenIssuer};
