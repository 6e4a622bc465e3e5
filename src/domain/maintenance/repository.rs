//! Maintenance repository interface

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::model::{Maintenance, MaintenanceStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Insert a new maintenance, attaching it to its vehicle
    async fn save(&self, maintenance: Maintenance) -> DomainResult<()>;

    /// Find maintenance by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Maintenance>>;

    /// All maintenances of a vehicle, in the order they were attached
    async fn find_by_vehicle(&self, vehicle_id: Uuid) -> DomainResult<Vec<Maintenance>>;

    /// Write `status` and `final_cost` only if the stored status still
    /// equals `expected`. No other column is touched. Returns `false`
    /// when the stored status moved.
    async fn update_status(
        &self,
        id: Uuid,
        expected: MaintenanceStatus,
        status: MaintenanceStatus,
        final_cost: Option<Decimal>,
    ) -> DomainResult<bool>;
}
