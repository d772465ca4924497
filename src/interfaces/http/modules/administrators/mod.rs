//! Administrator endpoints: login and admin-only directory

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
