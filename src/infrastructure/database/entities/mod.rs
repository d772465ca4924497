//! SeaORM entities

pub mod administrator;
pub mod vehicle;

pub use administrator::Entity as Administrator;
pub use vehicle::Entity as Vehicle;
