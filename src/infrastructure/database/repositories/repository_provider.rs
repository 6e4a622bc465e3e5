//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{MaintenanceRepository, RepositoryProvider, VehicleRepository};

use super::maintenance_repository::SeaOrmMaintenanceRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmVehicleRepository,
    maintenances: SeaOrmMaintenanceRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            maintenances: SeaOrmMaintenanceRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn maintenances(&self) -> &dyn MaintenanceRepository {
        &self.maintenances
    }
}
