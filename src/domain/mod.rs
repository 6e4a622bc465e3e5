//! Domain layer: entities, the maintenance state machine, repository
//! ports and pure fleet derivations.

pub mod maintenance;
pub mod repositories;
pub mod services;
pub mod vehicle;

pub use maintenance::{
    Maintenance, MaintenanceRepository, MaintenanceStatus, MaintenanceType, NewMaintenance,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use vehicle::{NewVehicle, Vehicle, VehicleRepository};

pub use crate::shared::errors::{DomainError, TransitionError};
