//! Authentication middleware for Axum
//!
//! `auth_middleware` verifies the bearer token and stores the caller as an
//! [`AuthenticatedAdministrator`] extension. `role_gate` runs after it and
//! rejects callers whose role is outside the route's policy.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::application::TokenIssuer;
use crate::domain::Role;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InsufficientPermissions,
}

/// Authentication state
#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenIssuer,
}

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedAdministrator {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

/// Roles allowed through a [`role_gate`]
#[derive(Clone, Copy, Debug)]
pub struct RolePolicy {
    allowed: &'static [Role],
}

impl RolePolicy {
    pub const ADMIN_ONLY: RolePolicy = RolePolicy {
        allowed: &[Role::Admin],
    };
    pub const STAFF: RolePolicy = RolePolicy {
        allowed: &[Role::Admin, Role::Editor],
    };

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT bearer authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let Ok(claims) = auth_state.tokens.verify(token) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let (Some(id), Some(role)) = (claims.administrator_id(), claims.resolved_role()) else {
        warn!(sub = %claims.sub, "Token carries no usable subject or role");
        return auth_error_response(AuthError::InvalidToken);
    };

    request.extensions_mut().insert(AuthenticatedAdministrator {
        id,
        email: claims.email,
        role,
    });
    next.run(request).await
}

/// Role check; must be layered inside [`auth_middleware`].
pub async fn role_gate(
    State(policy): State<RolePolicy>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(caller) = request.extensions().get::<AuthenticatedAdministrator>() else {
        return auth_error_response(AuthError::MissingToken);
    };

    if !policy.permits(caller.role) {
        warn!(
            administrator_id = caller.id,
            role = %caller.role,
            path = %request.uri().path(),
            "Role not permitted"
        );
        return auth_error_response(AuthError::InsufficientPermissions);
    }

    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
    };

    let body = Json(json!({
        "success": false,
        "data": null,
        "error": message
    }));

    (status, body).into_response()
}
