//! Application services

mod fleet_views;
mod maintenance;
mod vehicle;

pub use fleet_views::FleetViewService;
pub use maintenance::MaintenanceService;
pub use vehicle::VehicleService;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, Vehicle};

async fn require_vehicle(repos: &dyn RepositoryProvider, plate: &str) -> DomainResult<Vehicle> {
    repos
        .vehicles()
        .find_by_plate(plate)
        .await?
        .ok_or_else(|| DomainError::VehicleNotFound(plate.to_string()))
}

fn is_contention(err: &DomainError) -> bool {
    matches!(err, DomainError::ConcurrentModification { .. })
}
