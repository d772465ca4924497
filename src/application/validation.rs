//! Payload rules for administrators and vehicles.
//!
//! Each rule set returns every violated rule in a fixed order; an empty list
//! means the payload is valid. Fields are optional so that missing JSON keys
//! surface as messages instead of deserialization errors.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewVehicle, Role};

pub const MIN_VEHICLE_YEAR: i32 = 1950;

/// Types that can list their own rule violations
pub trait Rules {
    fn violations(&self) -> Vec<String>;
}

/// Submitted administrator fields
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct AdministratorPayload {
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    #[schema(example = "editor@fleet.io")]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "password must be at most 50 characters"))]
    #[schema(example = "s3cret")]
    pub password: Option<String>,
    /// `ADMIN` or `EDITOR`
    #[schema(example = "EDITOR")]
    pub role: Option<String>,
}

impl AdministratorPayload {
    /// Email, password and role, assuming the payload passed
    /// [`validate_administrator`].
    pub fn into_parts(self) -> (String, String, Option<Role>) {
        let role = self.role.as_deref().and_then(|r| r.parse().ok());
        (
            self.email.unwrap_or_default(),
            self.password.unwrap_or_default(),
            role,
        )
    }
}

/// Submitted vehicle fields
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct VehiclePayload {
    #[schema(example = "Toyota")]
    pub brand: Option<String>,
    #[schema(example = "Corolla")]
    pub model: Option<String>,
    #[schema(example = 2020)]
    pub year: Option<i32>,
}

impl VehiclePayload {
    /// Vehicle fields, assuming the payload passed [`validate_vehicle`].
    pub fn into_new_vehicle(self) -> NewVehicle {
        NewVehicle {
            brand: self.brand.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub fn validate_administrator(payload: &AdministratorPayload) -> Vec<String> {
    let mut messages = Vec::new();

    if is_blank(payload.email.as_deref()) {
        messages.push("email must not be empty".to_string());
    }
    if payload.password.as_deref().map_or(true, str::is_empty) {
        messages.push("password must not be empty".to_string());
    }
    match payload.role.as_deref() {
        r if is_blank(r) => messages.push("role must not be empty".to_string()),
        Some(role) if role.parse::<Role>().is_err() => {
            let known: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
            messages.push(format!("role must be one of {}", known.join(", ")));
        }
        _ => {}
    }

    if let Err(errors) = payload.validate() {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, errs) in fields {
            for e in errs {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                messages.push(msg);
            }
        }
    }

    messages
}

pub fn validate_vehicle(payload: &VehiclePayload) -> Vec<String> {
    let mut messages = Vec::new();

    if is_blank(payload.brand.as_deref()) {
        messages.push("brand must not be empty".to_string());
    }
    if is_blank(payload.model.as_deref()) {
        messages.push("model must not be empty".to_string());
    }
    if payload.year.unwrap_or_default() < MIN_VEHICLE_YEAR {
        messages.push(format!("year must be {} or later", MIN_VEHICLE_YEAR));
    }

    messages
}

impl Rules for AdministratorPayload {
    fn violations(&self) -> Vec<String> {
        validate_administrator(self)
    }
}

impl Rules for VehiclePayload {
    fn violations(&self) -> Vec<String> {
        validate_vehicle(self)
    }
}
