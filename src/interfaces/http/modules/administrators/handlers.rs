//! Administrator API handlers
//!
//! Thin wrappers over `AdministratorService` and `TokenIssuer`.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};

use super::dto::{AdministratorDto, ListAdministratorsParams, LoginRequest, LoginResponse};
use crate::application::{AdministratorPayload, AdministratorService, TokenIssuer};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, JsonBody, ValidatedJson};
use crate::shared::PageRequest;

#[derive(Clone)]
pub struct AdministratorHandlerState {
    pub service: AdministratorService,
    pub tokens: TokenIssuer,
}

#[utoipa::path(
    post,
    path = "/administrators/login",
    tag = "Administrators",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AdministratorHandlerState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let Some(administrator) = state
        .service
        .login(&request.email, &request.password)
        .await?
    else {
        warn!("Rejected login attempt");
        return Err(DomainError::Unauthorized("Invalid email or password".into()).into());
    };

    let issued = state.tokens.issue(&administrator)?;
    info!(administrator_id = administrator.id, "Administrator logged in");

    Ok(Json(ApiResponse::success(LoginResponse {
        token: issued.token,
        token_type: issued.token_type.to_string(),
        expires_in: issued.expires_in,
        administrator: administrator.into(),
    })))
}

#[utoipa::path(
    get,
    path = "/administrators",
    tag = "Administrators",
    security(("bearer_auth" = [])),
    params(ListAdministratorsParams),
    responses(
        (status = 200, description = "Administrator list", body = ApiResponse<Vec<AdministratorDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "ADMIN role required")
    )
)]
pub async fn list_administrators(
    State(state): State<AdministratorHandlerState>,
    Query(params): Query<ListAdministratorsParams>,
) -> ApiResult<Json<ApiResponse<Vec<AdministratorDto>>>> {
    let administrators = state
        .service
        .list(PageRequest::from_query(params.page))
        .await?;

    Ok(Json(ApiResponse::success(
        administrators.into_iter().map(AdministratorDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/administrators/{id}",
    tag = "Administrators",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Administrator id")),
    responses(
        (status = 200, description = "Administrator", body = ApiResponse<AdministratorDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "ADMIN role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_administrator(
    State(state): State<AdministratorHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<AdministratorDto>>> {
    let administrator = state
        .service
        .get_by_id(id)
        .await?
        .ok_or(ApiError::not_found("Administrator", id))?;

    Ok(Json(ApiResponse::success(administrator.into())))
}

#[utoipa::path(
    post,
    path = "/administrators",
    tag = "Administrators",
    security(("bearer_auth" = [])),
    request_body = AdministratorPayload,
    responses(
        (status = 201, description = "Administrator created", body = ApiResponse<AdministratorDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "ADMIN role required"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_administrator(
    State(state): State<AdministratorHandlerState>,
    ValidatedJson(payload): ValidatedJson<AdministratorPayload>,
) -> ApiResult<impl IntoResponse> {
    let (email, password, role) = payload.into_parts();

    let administrator = state.service.create(&email, &password, role).await?;
    let location = format!("/administrators/{}", administrator.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(AdministratorDto::from(administrator))),
    ))
}
