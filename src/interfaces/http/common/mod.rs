//! Response envelope, error mapping and JSON extractors shared by all modules

pub mod validated_json;

pub use validated_json::{JsonBody, ValidatedJson};

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API response wrapper
///
/// Success: `{"success": true, "data": {...}}`.
/// Failure: `{"success": false, "data": null, "error": "...", "messages": [...]}`
/// where `messages` is only present for validation failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Every violated rule, in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            messages: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            messages: None,
        }
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some("Validation failed".to_string()),
            messages: Some(messages),
        }
    }
}

/// Error returned by handlers; renders as an `ApiResponse` envelope.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// Body could not be parsed as the expected JSON
    MalformedBody(String),
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::Domain(DomainError::NotFound { entity, id })
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::Domain(DomainError::Validation(messages))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Domain(e) => match e {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::Persistence(_) | DomainError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::MalformedBody(detail) => ApiResponse::<()>::error(format!("Invalid JSON: {}", detail)),
            Self::Domain(DomainError::Validation(messages)) => ApiResponse::validation(messages),
            Self::Domain(e @ (DomainError::Persistence(_) | DomainError::Internal(_))) => {
                error!("Request failed: {}", e);
                ApiResponse::error("Internal server error")
            }
            Self::Domain(e) => ApiResponse::error(e.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
