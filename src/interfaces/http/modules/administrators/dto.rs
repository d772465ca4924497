//! Administrator DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Administrator;

/// Public view of an administrator. The password hash never leaves the
/// service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdministratorDto {
    pub id: i32,
    pub email: String,
    /// `ADMIN` or `EDITOR`
    #[schema(example = "ADMIN")]
    pub role: String,
}

impl From<Administrator> for AdministratorDto {
    fn from(a: Administrator) -> Self {
        Self {
            id: a.id,
            email: a.email,
            role: a.role.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "administrador@email.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub administrator: AdministratorDto,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAdministratorsParams {
    /// 1-based page of 10; omit for every administrator
    pub page: Option<u64>,
}
