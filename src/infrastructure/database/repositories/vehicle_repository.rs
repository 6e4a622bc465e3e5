//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use log::{debug, warn};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::{DomainError, DomainResult, Vehicle, VehicleRepository};
use crate::infrastructure::database::entities::{maintenance, vehicle};

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        license_plate: m.license_plate,
        brand: m.brand,
        model: m.model_name,
        year: m.year,
        current_mileage: m.current_mileage,
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn save(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Saving vehicle: {} ({})", v.license_plate, v.id);

        let plate = v.license_plate.clone();
        let model = vehicle::ActiveModel {
            id: Set(v.id),
            license_plate: Set(v.license_plate),
            brand: Set(v.brand),
            model_name: Set(v.model),
            year: Set(v.year),
            current_mileage: Set(v.current_mileage),
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    warn!("Plate {} already registered", plate);
                    Err(DomainError::DuplicateLicensePlate(plate))
                }
                _ => Err(db_err(e)),
            },
        }
    }

    async fn find_by_plate(&self, license_plate: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find()
            .filter(vehicle::Column::LicensePlate.eq(license_plate))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn exists_by_plate(&self, license_plate: &str) -> DomainResult<bool> {
        let count = vehicle::Entity::find()
            .filter(vehicle::Column::LicensePlate.eq(license_plate))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn update_mileage(
        &self,
        id: Uuid,
        expected_mileage: i32,
        new_mileage: i32,
    ) -> DomainResult<bool> {
        debug!(
            "Updating mileage of vehicle {}: {} -> {}",
            id, expected_mileage, new_mileage
        );

        let result = vehicle::Entity::update_many()
            .col_expr(
                vehicle::Column::CurrentMileage,
                sea_orm::sea_query::Expr::value(new_mileage),
            )
            .filter(vehicle::Column::Id.eq(id))
            .filter(vehicle::Column::CurrentMileage.eq(expected_mileage))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected == 1)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        debug!("Deleting vehicle {} with its maintenances", id);

        let txn = self.db.begin().await.map_err(db_err)?;

        maintenance::Entity::delete_many()
            .filter(maintenance::Column::VehicleId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = vehicle::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewVehicle;
    use crate::infrastructure::database::test_database;

    fn vehicle(plate: &str) -> Vehicle {
        Vehicle::new(NewVehicle {
            license_plate: plate.into(),
            brand: "Ford".into(),
            model: "Transit".into(),
            year: 2019,
            current_mileage: 80000,
        })
    }

    #[tokio::test]
    async fn save_and_find_by_plate() {
        let repo = SeaOrmVehicleRepository::new(test_database().await);
        let v = vehicle("ABC-1234");
        repo.save(v.clone()).await.unwrap();

        assert_eq!(repo.find_by_plate("ABC-1234").await.unwrap(), Some(v.clone()));
        assert_eq!(repo.find_by_id(v.id).await.unwrap(), Some(v));
        assert!(repo.exists_by_plate("ABC-1234").await.unwrap());
        assert!(!repo.exists_by_plate("ZZZ-0000").await.unwrap());
    }

    #[tokio::test]
    async fn unique_index_rejects_duplicate_plate() {
        let repo = SeaOrmVehicleRepository::new(test_database().await);
        repo.save(vehicle("XYZ-9999")).await.unwrap();

        let err = repo.save(vehicle("XYZ-9999")).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateLicensePlate(p) if p == "XYZ-9999"));

        let count = vehicle::Entity::find().count(&repo.db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn mileage_update_is_compare_and_set() {
        let repo = SeaOrmVehicleRepository::new(test_database().await);
        let v = vehicle("ABC-1234");
        repo.save(v.clone()).await.unwrap();

        assert!(!repo.update_mileage(v.id, 1, 90000).await.unwrap());
        assert!(repo.update_mileage(v.id, 80000, 90000).await.unwrap());
        assert!(!repo.update_mileage(v.id, 80000, 95000).await.unwrap());

        let stored = repo.find_by_id(v.id).await.unwrap().unwrap();
        assert_eq!(stored.current_mileage, 90000);
    }

    #[tokio::test]
    async fn delete_missing_vehicle_reports_false() {
        let repo = SeaOrmVehicleRepository::new(test_database().await);
        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
    }
}
