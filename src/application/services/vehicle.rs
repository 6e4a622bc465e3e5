//! Vehicle registry and mileage tracking

use std::sync::Arc;

use tracing::{info, warn};

use super::{is_contention, require_vehicle};
use crate::domain::{
    DomainError, DomainResult, Maintenance, NewVehicle, RepositoryProvider, Vehicle,
};
use crate::shared::{retry_with_backoff, RetryConfig};

/// Registers vehicles and moves their odometer forward.
pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Register a new vehicle under a plate nobody else holds.
    pub async fn register(&self, draft: NewVehicle) -> DomainResult<Vehicle> {
        if self.repos.vehicles().exists_by_plate(&draft.license_plate).await? {
            warn!(plate = %draft.license_plate, "Rejected duplicate plate");
            return Err(DomainError::DuplicateLicensePlate(draft.license_plate));
        }

        // The store re-checks the plate atomically; a racing insert still
        // surfaces as DuplicateLicensePlate from here.
        let vehicle = Vehicle::new(draft);
        self.repos.vehicles().save(vehicle.clone()).await?;

        metrics::counter!("fleet_vehicles_registered_total").increment(1);
        info!(
            plate = %vehicle.license_plate,
            vehicle_id = %vehicle.id,
            "Vehicle registered: {} {} ({})",
            vehicle.brand,
            vehicle.model,
            vehicle.year
        );

        Ok(vehicle)
    }

    pub async fn get_by_plate(&self, plate: &str) -> DomainResult<Vehicle> {
        require_vehicle(self.repos.as_ref(), plate).await
    }

    /// Every maintenance of the vehicle, in attachment order.
    pub async fn maintenances(&self, plate: &str) -> DomainResult<Vec<Maintenance>> {
        let vehicle = require_vehicle(self.repos.as_ref(), plate).await?;
        self.repos.maintenances().find_by_vehicle(vehicle.id).await
    }

    /// Set the odometer to `new_mileage`, which must exceed the stored value.
    pub async fn update_mileage(&self, plate: &str, new_mileage: i32) -> DomainResult<Vehicle> {
        retry_with_backoff(
            RetryConfig::contention(),
            move || self.try_update_mileage(plate, new_mileage),
            is_contention,
            "update_mileage",
        )
        .await
    }

    async fn try_update_mileage(&self, plate: &str, new_mileage: i32) -> DomainResult<Vehicle> {
        let mut vehicle = require_vehicle(self.repos.as_ref(), plate).await?;

        if !vehicle.accepts_mileage(new_mileage) {
            return Err(DomainError::InvalidMileage {
                license_plate: vehicle.license_plate,
                current: vehicle.current_mileage,
                new: new_mileage,
            });
        }

        let applied = self
            .repos
            .vehicles()
            .update_mileage(vehicle.id, vehicle.current_mileage, new_mileage)
            .await?;
        if !applied {
            return Err(DomainError::ConcurrentModification {
                entity: "Vehicle",
                id: vehicle.license_plate,
            });
        }

        let previous = vehicle.current_mileage;
        vehicle.current_mileage = new_mileage;

        metrics::counter!("fleet_mileage_updates_total").increment(1);
        info!(plate = %plate, previous, current = new_mileage, "Mileage updated");

        Ok(vehicle)
    }
}
