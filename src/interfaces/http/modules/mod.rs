//! Route handlers grouped by resource

pub mod administrators;
pub mod home;
pub mod metrics;
pub mod request_id;
pub mod vehicles;
