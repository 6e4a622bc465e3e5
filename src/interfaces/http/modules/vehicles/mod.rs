//! Vehicles module: registry, mileage and per-vehicle fleet views

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
