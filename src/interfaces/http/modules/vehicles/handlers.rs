//! Vehicle API handlers
//!
//! Reads and creation are open to ADMIN and EDITOR; update and delete are
//! ADMIN-only (enforced by the router's role gates).

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{ListVehiclesParams, VehicleDto};
use crate::application::{validate_vehicle, VehiclePayload, VehicleService};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, JsonBody, ValidatedJson};

#[derive(Clone)]
pub struct VehicleHandlerState {
    pub service: VehicleService,
}

#[utoipa::path(
    get,
    path = "/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(ListVehiclesParams),
    responses(
        (status = 200, description = "Vehicle list", body = ApiResponse<Vec<VehicleDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "ADMIN or EDITOR role required")
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleHandlerState>,
    Query(params): Query<ListVehiclesParams>,
) -> ApiResult<Json<ApiResponse<Vec<VehicleDto>>>> {
    let vehicles = state.service.list(params.into()).await?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle", body = ApiResponse<VehicleDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<VehicleDto>>> {
    let vehicle = state
        .service
        .get_by_id(id)
        .await?
        .ok_or(ApiError::not_found("Vehicle", id))?;

    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    post,
    path = "/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = VehiclePayload,
    responses(
        (status = 201, description = "Vehicle created", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleHandlerState>,
    ValidatedJson(payload): ValidatedJson<VehiclePayload>,
) -> ApiResult<impl IntoResponse> {
    let vehicle = state.service.create(payload.into_new_vehicle()).await?;
    let location = format!("/vehicles/{}", vehicle.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(VehicleDto::from(vehicle))),
    ))
}

/// Existence is checked before the payload, so a missing id is 404 even
/// when the body is also invalid.
#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle id")),
    request_body = VehiclePayload,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "ADMIN role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i32>,
    JsonBody(payload): JsonBody<VehiclePayload>,
) -> ApiResult<Json<ApiResponse<VehicleDto>>> {
    let mut vehicle = state
        .service
        .get_by_id(id)
        .await?
        .ok_or(ApiError::not_found("Vehicle", id))?;

    let messages = validate_vehicle(&payload);
    if !messages.is_empty() {
        return Err(ApiError::validation(messages));
    }

    vehicle.apply(payload.into_new_vehicle());
    let updated = state.service.update(&vehicle).await?;

    Ok(Json(ApiResponse::success(updated.into())))
}

#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "ADMIN role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let vehicle = state
        .service
        .get_by_id(id)
        .await?
        .ok_or(ApiError::not_found("Vehicle", id))?;

    state.service.delete(&vehicle).await?;
    Ok(StatusCode::NO_CONTENT)
}
