//! SeaORM implementation of MaintenanceRepository

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::{db_err, parse_decimal};
use crate::domain::{
    DomainError, DomainResult, Maintenance, MaintenanceRepository, MaintenanceStatus,
    MaintenanceType,
};
use crate::infrastructure::database::entities::maintenance;

pub struct SeaOrmMaintenanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmMaintenanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: maintenance::Model) -> DomainResult<Maintenance> {
    let maintenance_type = MaintenanceType::from_str(&m.maintenance_type).ok_or_else(|| {
        DomainError::Storage(format!("Unknown maintenance type '{}'", m.maintenance_type))
    })?;
    let status = MaintenanceStatus::from_str(&m.status)
        .ok_or_else(|| DomainError::Storage(format!("Unknown status '{}'", m.status)))?;
    let final_cost = m
        .final_cost
        .as_deref()
        .map(|raw| parse_decimal("final_cost", raw))
        .transpose()?;

    Ok(Maintenance {
        id: m.id,
        vehicle_id: m.vehicle_id,
        maintenance_type,
        description: m.description,
        created_at: m.created_at,
        status,
        estimated_cost: parse_decimal("estimated_cost", &m.estimated_cost)?,
        final_cost,
    })
}

// ── MaintenanceRepository impl ──────────────────────────────────

#[async_trait]
impl MaintenanceRepository for SeaOrmMaintenanceRepository {
    async fn save(&self, m: Maintenance) -> DomainResult<()> {
        debug!("Saving maintenance {} for vehicle {}", m.id, m.vehicle_id);

        let model = maintenance::ActiveModel {
            id: Set(m.id),
            vehicle_id: Set(m.vehicle_id),
            maintenance_type: Set(m.maintenance_type.as_str().to_string()),
            description: Set(m.description),
            status: Set(m.status.as_str().to_string()),
            estimated_cost: Set(m.estimated_cost.to_string()),
            final_cost: Set(m.final_cost.map(|c| c.to_string())),
            created_at: Set(m.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Maintenance>> {
        let model = maintenance::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_vehicle(&self, vehicle_id: Uuid) -> DomainResult<Vec<Maintenance>> {
        // rowid breaks ties between rows created within the same instant
        let models = maintenance::Entity::find()
            .filter(maintenance::Column::VehicleId.eq(vehicle_id))
            .order_by_asc(maintenance::Column::CreatedAt)
            .order_by(Expr::cust("rowid"), Order::Asc)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: MaintenanceStatus,
        status: MaintenanceStatus,
        final_cost: Option<Decimal>,
    ) -> DomainResult<bool> {
        debug!("Updating maintenance {}: {} -> {}", id, expected, status);

        let result = maintenance::Entity::update_many()
            .col_expr(maintenance::Column::Status, Expr::value(status.as_str()))
            .col_expr(
                maintenance::Column::FinalCost,
                Expr::value(final_cost.map(|c| c.to_string())),
            )
            .filter(maintenance::Column::Id.eq(id))
            .filter(maintenance::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewMaintenance, NewVehicle, Vehicle, VehicleRepository};
    use crate::infrastructure::database::repositories::vehicle_repository::SeaOrmVehicleRepository;
    use crate::infrastructure::database::test_database;

    async fn setup() -> (SeaOrmVehicleRepository, SeaOrmMaintenanceRepository, Vehicle) {
        let db = test_database().await;
        let vehicles = SeaOrmVehicleRepository::new(db.clone());
        let maintenances = SeaOrmMaintenanceRepository::new(db);
        let v = Vehicle::new(NewVehicle {
            license_plate: "ABC-1234".into(),
            brand: "BMW".into(),
            model: "135i".into(),
            year: 2022,
            current_mileage: 15000,
        });
        vehicles.save(v.clone()).await.unwrap();
        (vehicles, maintenances, v)
    }

    fn maintenance(vehicle_id: Uuid, description: &str) -> Maintenance {
        Maintenance::new(
            vehicle_id,
            NewMaintenance {
                maintenance_type: MaintenanceType::OilChange,
                description: description.into(),
                estimated_cost: Decimal::new(15000, 2),
            },
        )
    }

    #[tokio::test]
    async fn stored_record_reads_back_identically() {
        let (_, repo, v) = setup().await;
        let mut m = maintenance(v.id, "Oil and filter");
        m.status = MaintenanceStatus::Completed;
        m.final_cost = Some(Decimal::new(17550, 2));
        repo.save(m.clone()).await.unwrap();

        let loaded = repo.find_by_id(m.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, m.id);
        assert_eq!(loaded.maintenance_type, MaintenanceType::OilChange);
        assert_eq!(loaded.status, MaintenanceStatus::Completed);
        assert_eq!(loaded.estimated_cost, Decimal::new(15000, 2));
        assert_eq!(loaded.final_cost, Some(Decimal::new(17550, 2)));
        assert_eq!(loaded.created_at.timestamp_micros(), m.created_at.timestamp_micros());
    }

    #[tokio::test]
    async fn list_preserves_attachment_order() {
        let (_, repo, v) = setup().await;
        let descriptions = ["one", "two", "three", "four"];
        let created_at = chrono::Utc::now();
        for d in descriptions {
            // Same timestamp for all rows; insertion order must still hold
            let mut m = maintenance(v.id, d);
            m.created_at = created_at;
            repo.save(m).await.unwrap();
        }

        let listed = repo.find_by_vehicle(v.id).await.unwrap();
        let got: Vec<_> = listed.iter().map(|m| m.description.as_str()).collect();
        assert_eq!(got, descriptions);
        assert!(repo.find_by_vehicle(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_update_is_compare_and_set() {
        let (_, repo, v) = setup().await;
        let m = maintenance(v.id, "brakes");
        repo.save(m.clone()).await.unwrap();

        assert!(repo
            .update_status(m.id, MaintenanceStatus::Pending, MaintenanceStatus::InProgress, None)
            .await
            .unwrap());
        assert!(!repo
            .update_status(m.id, MaintenanceStatus::Pending, MaintenanceStatus::Cancelled, None)
            .await
            .unwrap());
        assert!(repo
            .update_status(
                m.id,
                MaintenanceStatus::InProgress,
                MaintenanceStatus::Completed,
                Some(Decimal::new(9999, 2)),
            )
            .await
            .unwrap());

        let stored = repo.find_by_id(m.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MaintenanceStatus::Completed);
        assert_eq!(stored.final_cost, Some(Decimal::new(9999, 2)));
        assert_eq!(stored.description, "brakes");
    }

    #[tokio::test]
    async fn deleting_vehicle_removes_its_maintenances() {
        let (vehicles, repo, v) = setup().await;
        let m = maintenance(v.id, "tires");
        repo.save(m.clone()).await.unwrap();

        assert!(vehicles.delete(v.id).await.unwrap());
        assert!(repo.find_by_id(m.id).await.unwrap().is_none());
        assert!(vehicles.find_by_plate("ABC-1234").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn orphan_maintenance_is_rejected() {
        let (_, repo, _) = setup().await;
        let err = repo
            .save(maintenance(Uuid::new_v4(), "orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
