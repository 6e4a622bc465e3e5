//! Vehicle aggregate
//!
//! The vehicle is the aggregate root that owns its maintenance records.

pub mod model;
pub mod repository;

pub use model::{NewVehicle, Vehicle};
pub use repository::VehicleRepository;
