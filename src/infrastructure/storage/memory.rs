//! In-memory storage implementation

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, Maintenance, MaintenanceRepository, MaintenanceStatus,
    RepositoryProvider, Vehicle, VehicleRepository,
};

/// In-memory storage for development and testing.
///
/// Every compare-and-set runs under the DashMap shard lock of the row it
/// touches, and the plate index is claimed through the entry API, so the
/// same atomicity guarantees hold as for the SQL store.
#[derive(Default)]
pub struct InMemoryStorage {
    vehicles: DashMap<Uuid, Vehicle>,
    plates: DashMap<String, Uuid>,
    maintenances: DashMap<Uuid, Maintenance>,
    /// Maintenance IDs per vehicle, in attachment order
    attached: DashMap<Uuid, Vec<Uuid>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStorage {
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()> {
        match self.plates.entry(vehicle.license_plate.clone()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateLicensePlate(vehicle.license_plate)),
            Entry::Vacant(slot) => {
                let id = vehicle.id;
                self.attached.insert(id, Vec::new());
                self.vehicles.insert(id, vehicle);
                slot.insert(id);
                Ok(())
            }
        }
    }

    async fn find_by_plate(&self, license_plate: &str) -> DomainResult<Option<Vehicle>> {
        let Some(id) = self.plates.get(license_plate).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.vehicles.get(&id).map(|v| v.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(&id).map(|v| v.clone()))
    }

    async fn exists_by_plate(&self, license_plate: &str) -> DomainResult<bool> {
        Ok(self.plates.contains_key(license_plate))
    }

    async fn update_mileage(
        &self,
        id: Uuid,
        expected_mileage: i32,
        new_mileage: i32,
    ) -> DomainResult<bool> {
        match self.vehicles.get_mut(&id) {
            Some(mut v) if v.current_mileage == expected_mileage => {
                v.current_mileage = new_mileage;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        // Detach children first so no new maintenance can be attached
        // to a vehicle that is going away.
        if let Some((_, children)) = self.attached.remove(&id) {
            for child in children {
                self.maintenances.remove(&child);
            }
        }

        match self.vehicles.remove(&id) {
            Some((_, vehicle)) => {
                self.plates.remove(&vehicle.license_plate);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryStorage {
    async fn save(&self, maintenance: Maintenance) -> DomainResult<()> {
        match self.attached.get_mut(&maintenance.vehicle_id) {
            // Record and index entry are both written under the index lock,
            // which `delete` must take before sweeping children.
            Some(mut children) => {
                children.push(maintenance.id);
                self.maintenances.insert(maintenance.id, maintenance);
                drop(children);
                Ok(())
            }
            None => Err(DomainError::Storage(format!(
                "vehicle {} does not exist",
                maintenance.vehicle_id
            ))),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Maintenance>> {
        Ok(self.maintenances.get(&id).map(|m| m.clone()))
    }

    async fn find_by_vehicle(&self, vehicle_id: Uuid) -> DomainResult<Vec<Maintenance>> {
        let ids = self
            .attached
            .get(&vehicle_id)
            .map(|ids| ids.clone())
            .unwrap_or_default();

        Ok(ids
            .iter()
            .filter_map(|id| self.maintenances.get(id).map(|m| m.clone()))
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: MaintenanceStatus,
        status: MaintenanceStatus,
        final_cost: Option<Decimal>,
    ) -> DomainResult<bool> {
        match self.maintenances.get_mut(&id) {
            Some(mut m) if m.status == expected => {
                m.status = status;
                m.final_cost = final_cost;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn maintenances(&self) -> &dyn MaintenanceRepository {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MaintenanceType, NewMaintenance, NewVehicle};

    fn vehicle(plate: &str) -> Vehicle {
        Vehicle::new(NewVehicle {
            license_plate: plate.into(),
            brand: "Toyota".into(),
            model: "Corolla".into(),
            year: 2020,
            current_mileage: 1000,
        })
    }

    fn maintenance(vehicle_id: Uuid, description: &str) -> Maintenance {
        Maintenance::new(
            vehicle_id,
            NewMaintenance {
                maintenance_type: MaintenanceType::Tires,
                description: description.into(),
                estimated_cost: Decimal::new(400, 0),
            },
        )
    }

    #[tokio::test]
    async fn duplicate_plate_is_rejected_without_side_effects() {
        let store = InMemoryStorage::new();
        let first = vehicle("XYZ-9999");
        let second = vehicle("XYZ-9999");
        let second_id = second.id;

        VehicleRepository::save(&store, first.clone()).await.unwrap();
        let err = VehicleRepository::save(&store, second).await.unwrap_err();

        assert!(matches!(err, DomainError::DuplicateLicensePlate(p) if p == "XYZ-9999"));
        assert!(VehicleRepository::find_by_id(&store, second_id).await.unwrap().is_none());
        assert_eq!(
            store.find_by_plate("XYZ-9999").await.unwrap().unwrap().id,
            first.id
        );
    }

    #[tokio::test]
    async fn concurrent_registrations_of_one_plate_admit_exactly_one() {
        let store = std::sync::Arc::new(InMemoryStorage::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                VehicleRepository::save(store.as_ref(), vehicle("RACE-01")).await
            }));
        }

        let mut ok = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.vehicles.len(), 1);
    }

    #[tokio::test]
    async fn mileage_cas_only_applies_on_expected_value() {
        let store = InMemoryStorage::new();
        let v = vehicle("ABC-1234");
        VehicleRepository::save(&store, v.clone()).await.unwrap();

        assert!(!store.update_mileage(v.id, 999, 2000).await.unwrap());
        assert!(store.update_mileage(v.id, 1000, 2000).await.unwrap());
        assert!(!store.update_mileage(v.id, 1000, 3000).await.unwrap());

        let stored = VehicleRepository::find_by_id(&store, v.id).await.unwrap().unwrap();
        assert_eq!(stored.current_mileage, 2000);
    }

    #[tokio::test]
    async fn maintenances_come_back_in_attachment_order() {
        let store = InMemoryStorage::new();
        let v = vehicle("ABC-1234");
        VehicleRepository::save(&store, v.clone()).await.unwrap();

        let descriptions = ["first", "second", "third"];
        for d in descriptions {
            MaintenanceRepository::save(&store, maintenance(v.id, d)).await.unwrap();
        }

        let listed = store.find_by_vehicle(v.id).await.unwrap();
        let got: Vec<_> = listed.iter().map(|m| m.description.as_str()).collect();
        assert_eq!(got, descriptions);
    }

    #[tokio::test]
    async fn status_cas_rejects_stale_expectation() {
        let store = InMemoryStorage::new();
        let v = vehicle("ABC-1234");
        VehicleRepository::save(&store, v.clone()).await.unwrap();
        let m = maintenance(v.id, "rotate");
        MaintenanceRepository::save(&store, m.clone()).await.unwrap();

        assert!(store
            .update_status(m.id, MaintenanceStatus::Pending, MaintenanceStatus::InProgress, None)
            .await
            .unwrap());
        assert!(!store
            .update_status(m.id, MaintenanceStatus::Pending, MaintenanceStatus::Cancelled, None)
            .await
            .unwrap());

        let stored = MaintenanceRepository::find_by_id(&store, m.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MaintenanceStatus::InProgress);
        assert_eq!(stored.description, "rotate");
    }

    #[tokio::test]
    async fn attaching_to_unknown_vehicle_fails() {
        let store = InMemoryStorage::new();
        let err = MaintenanceRepository::save(&store, maintenance(Uuid::new_v4(), "orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[tokio::test]
    async fn delete_cascades_to_maintenances() {
        let store = InMemoryStorage::new();
        let v = vehicle("DEL-001");
        VehicleRepository::save(&store, v.clone()).await.unwrap();
        let m = maintenance(v.id, "brakes");
        MaintenanceRepository::save(&store, m.clone()).await.unwrap();

        assert!(store.delete(v.id).await.unwrap());
        assert!(!store.exists_by_plate("DEL-001").await.unwrap());
        assert!(MaintenanceRepository::find_by_id(&store, m.id).await.unwrap().is_none());
        assert!(store.find_by_vehicle(v.id).await.unwrap().is_empty());
        assert!(!store.delete(v.id).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn delete_racing_attachments_leaves_no_orphans() {
        for _ in 0..20 {
            let store = std::sync::Arc::new(InMemoryStorage::new());
            let v = vehicle("RACE-02");
            let id = v.id;
            VehicleRepository::save(store.as_ref(), v).await.unwrap();

            let mut handles = Vec::new();
            for i in 0..8 {
                let store = store.clone();
                handles.push(tokio::spawn(async move {
                    let _ = MaintenanceRepository::save(
                        store.as_ref(),
                        maintenance(id, &format!("job {i}")),
                    )
                    .await;
                }));
            }
            let deleter = {
                let store = store.clone();
                tokio::spawn(async move { store.delete(id).await.unwrap() })
            };

            for h in handles {
                h.await.unwrap();
            }
            assert!(deleter.await.unwrap());

            assert!(store.maintenances.is_empty());
            assert!(store.find_by_vehicle(id).await.unwrap().is_empty());
        }
    }
}
