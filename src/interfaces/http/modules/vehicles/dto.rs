//! Vehicle DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Vehicle, VehicleQuery};
use crate::shared::PageRequest;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    pub id: i32,
    #[schema(example = "Toyota")]
    pub brand: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 2020)]
    pub year: i32,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            brand: v.brand,
            model: v.model,
            year: v.year,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListVehiclesParams {
    /// 1-based page of 10; omit for every match
    pub page: Option<u64>,
    /// Case-insensitive substring of the brand
    pub brand: Option<String>,
    /// Case-insensitive substring of the model
    pub model: Option<String>,
}

impl From<ListVehiclesParams> for VehicleQuery {
    fn from(p: ListVehiclesParams) -> Self {
        VehicleQuery {
            page: PageRequest::from_query(p.page),
            brand: p.brand,
            model: p.model,
        }
    }
}
