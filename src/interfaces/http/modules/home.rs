//! Service root

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::interfaces::http::common::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeInfo {
    pub name: String,
    pub version: String,
    /// Path of the interactive API documentation
    pub docs: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Home",
    responses((status = 200, description = "Service information", body = ApiResponse<HomeInfo>))
)]
pub async fn home() -> Json<ApiResponse<HomeInfo>> {
    Json(ApiResponse::success(HomeInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/docs".to_string(),
    }))
}
