//! Vehicle aggregate

pub mod model;
pub mod repository;

mod dto_list;

pub use model::{NewVehicle, Vehicle};

pub use dto_list::VehicleQuery;

pub use repository::VehicleRepository;
