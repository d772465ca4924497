//! JSON extractors for Axum
//!
//! `JsonBody<T>` works like `axum::Json<T>` but answers malformed bodies with
//! the API envelope. `ValidatedJson<T>` additionally runs the payload's
//! [`Rules`] and rejects with 400 and every message when any rule fails.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::ApiError;
use crate::application::Rules;

/// JSON body whose parse errors render as `ApiError`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

/// An extractor that deserializes JSON and checks its rules.
///
/// ```ignore
/// async fn handler(ValidatedJson(body): ValidatedJson<VehiclePayload>) {
///     // `body` passed every vehicle rule
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Rules,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        let messages = value.violations();
        if !messages.is_empty() {
            return Err(ApiError::validation(messages));
        }

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
