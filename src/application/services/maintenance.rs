//! Maintenance lifecycle service

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use super::{is_contention, require_vehicle};
use crate::domain::{
    DomainError, DomainResult, Maintenance, MaintenanceStatus, NewMaintenance,
    RepositoryProvider,
};
use crate::shared::{retry_with_backoff, RetryConfig};

/// Registers maintenances and drives them through their lifecycle.
pub struct MaintenanceService {
    repos: Arc<dyn RepositoryProvider>,
}

impl MaintenanceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Open a PENDING maintenance on the vehicle with `plate`.
    pub async fn register(&self, plate: &str, draft: NewMaintenance) -> DomainResult<Maintenance> {
        let vehicle = require_vehicle(self.repos.as_ref(), plate).await?;

        let maintenance = Maintenance::new(vehicle.id, draft);
        self.repos.maintenances().save(maintenance.clone()).await?;

        metrics::counter!(
            "fleet_maintenances_registered_total",
            "type" => maintenance.maintenance_type.as_str()
        )
        .increment(1);
        info!(
            plate = %plate,
            maintenance_id = %maintenance.id,
            maintenance_type = %maintenance.maintenance_type,
            estimated_cost = %maintenance.estimated_cost,
            "Maintenance registered"
        );

        Ok(maintenance)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Maintenance> {
        self.repos
            .maintenances()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MaintenanceNotFound(id))
    }

    /// Move a maintenance to `new_status`.
    ///
    /// `final_cost` is required (and must be positive) when completing and
    /// is ignored for every other target. Only status and final cost are
    /// ever written.
    pub async fn change_status(
        &self,
        id: Uuid,
        new_status: MaintenanceStatus,
        final_cost: Option<Decimal>,
    ) -> DomainResult<Maintenance> {
        retry_with_backoff(
            RetryConfig::contention(),
            move || self.try_change_status(id, new_status, final_cost),
            is_contention,
            "change_status",
        )
        .await
    }

    async fn try_change_status(
        &self,
        id: Uuid,
        new_status: MaintenanceStatus,
        final_cost: Option<Decimal>,
    ) -> DomainResult<Maintenance> {
        let mut maintenance = self.get(id).await?;
        let from = maintenance.status;

        if let Err(e) = maintenance.apply_status(new_status, final_cost) {
            debug!(maintenance_id = %id, error = %e, "Status change rejected");
            return Err(e.into());
        }

        let applied = self
            .repos
            .maintenances()
            .update_status(id, from, maintenance.status, maintenance.final_cost)
            .await?;
        if !applied {
            return Err(DomainError::ConcurrentModification {
                entity: "Maintenance",
                id: id.to_string(),
            });
        }

        metrics::counter!(
            "fleet_maintenance_transitions_total",
            "from" => from.as_str(),
            "to" => new_status.as_str()
        )
        .increment(1);
        info!(maintenance_id = %id, %from, to = %new_status, "Maintenance status changed");

        Ok(maintenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MaintenanceType, NewVehicle, TransitionError, Vehicle};
    use crate::infrastructure::InMemoryStorage;

    async fn setup() -> (MaintenanceService, Vehicle) {
        let storage = Arc::new(InMemoryStorage::new());
        let vehicle = Vehicle::new(NewVehicle {
            license_plate: "ABC-1234".into(),
            brand: "BMW".into(),
            model: "135i".into(),
            year: 2022,
            current_mileage: 15000,
        });
        storage.vehicles().save(vehicle.clone()).await.unwrap();
        (MaintenanceService::new(storage), vehicle)
    }

    fn oil_change() -> NewMaintenance {
        NewMaintenance {
            maintenance_type: MaintenanceType::OilChange,
            description: "Regular oil change".into(),
            estimated_cost: Decimal::new(15000, 2),
        }
    }

    #[tokio::test]
    async fn register_attaches_pending_record() {
        let (svc, vehicle) = setup().await;
        let m = svc.register("ABC-1234", oil_change()).await.unwrap();

        assert_eq!(m.status, MaintenanceStatus::Pending);
        assert_eq!(m.vehicle_id, vehicle.id);
        assert!(m.final_cost.is_none());
        assert_eq!(svc.get(m.id).await.unwrap(), m);
    }

    #[tokio::test]
    async fn register_on_unknown_plate_fails() {
        let (svc, _) = setup().await;
        let err = svc.register("ZZZ-0000", oil_change()).await.unwrap_err();
        assert!(matches!(err, DomainError::VehicleNotFound(p) if p == "ZZZ-0000"));
    }

    #[tokio::test]
    async fn lifecycle_walkthrough() {
        let (svc, _) = setup().await;
        let m = svc.register("ABC-1234", oil_change()).await.unwrap();

        let err = svc
            .change_status(m.id, MaintenanceStatus::Completed, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid state transition from PENDING to COMPLETED");

        let m = svc
            .change_status(m.id, MaintenanceStatus::InProgress, None)
            .await
            .unwrap();
        assert_eq!(m.status, MaintenanceStatus::InProgress);

        let err = svc
            .change_status(m.id, MaintenanceStatus::Completed, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidStateTransition(TransitionError::FinalCostRequired)
        ));
        assert_eq!(svc.get(m.id).await.unwrap().status, MaintenanceStatus::InProgress);

        let done = svc
            .change_status(m.id, MaintenanceStatus::Completed, Some(Decimal::new(17550, 2)))
            .await
            .unwrap();
        assert_eq!(done.status, MaintenanceStatus::Completed);
        assert_eq!(done.final_cost, Some(Decimal::new(17550, 2)));

        let stored = svc.get(m.id).await.unwrap();
        assert_eq!(stored, done);
        assert_eq!(stored.description, "Regular oil change");
        assert_eq!(stored.estimated_cost, Decimal::new(15000, 2));

        // Terminal
        let err = svc
            .change_status(m.id, MaintenanceStatus::Cancelled, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition(_)));
    }

    #[tokio::test]
    async fn unknown_maintenance_is_not_found() {
        let (svc, _) = setup().await;
        let id = Uuid::new_v4();
        assert!(matches!(
            svc.get(id).await.unwrap_err(),
            DomainError::MaintenanceNotFound(x) if x == id
        ));
        assert!(matches!(
            svc.change_status(id, MaintenanceStatus::Cancelled, None)
                .await
                .unwrap_err(),
            DomainError::MaintenanceNotFound(_)
        ));
    }

    #[tokio::test]
    async fn conflicting_changes_resolve_to_a_serial_outcome() {
        let (svc, _) = setup().await;
        let svc = Arc::new(svc);
        let m = svc.register("ABC-1234", oil_change()).await.unwrap();
        svc.change_status(m.id, MaintenanceStatus::InProgress, None)
            .await
            .unwrap();
        let id = m.id;

        let complete = {
            let svc = svc.clone();
            tokio::spawn(async move {
                svc.change_status(id, MaintenanceStatus::Completed, Some(Decimal::ONE))
                    .await
            })
        };
        let cancel = {
            let svc = svc.clone();
            tokio::spawn(async move {
                svc.change_status(id, MaintenanceStatus::Cancelled, None).await
            })
        };

        let results = [complete.await.unwrap(), cancel.await.unwrap()];
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);

        let stored = svc.get(id).await.unwrap();
        assert!(stored.status.is_terminal());
        assert_eq!(
            stored.final_cost.is_some(),
            stored.status == MaintenanceStatus::Completed
        );
    }
}
