//! Domain errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Payload failed business rules; carries every violated rule.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation(messages)
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
