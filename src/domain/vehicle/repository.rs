//! Vehicle repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Vehicle;
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Insert a new vehicle.
    ///
    /// Plate uniqueness is enforced by the store itself: a concurrent or
    /// repeated insert with the same plate fails with
    /// `DomainError::DuplicateLicensePlate` and persists nothing.
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Find vehicle by license plate
    async fn find_by_plate(&self, license_plate: &str) -> DomainResult<Option<Vehicle>>;

    /// Find vehicle by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Vehicle>>;

    async fn exists_by_plate(&self, license_plate: &str) -> DomainResult<bool>;

    /// Set `current_mileage` to `new_mileage` only if it still equals
    /// `expected_mileage`. Returns `false` when the stored value moved.
    async fn update_mileage(
        &self,
        id: Uuid,
        expected_mileage: i32,
        new_mileage: i32,
    ) -> DomainResult<bool>;

    /// Remove a vehicle together with all of its maintenances.
    /// Returns `false` if no such vehicle existed.
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}
