//! Maintenances module: registration and lifecycle

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
