//! Create maintenances table
//!
//! Each row belongs to exactly one vehicle and is removed with it.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_vehicles::Vehicles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Maintenances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Maintenances::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Maintenances::VehicleId).uuid().not_null())
                    .col(
                        ColumnDef::new(Maintenances::MaintenanceType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Maintenances::Description)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Maintenances::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Maintenances::EstimatedCost)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Maintenances::FinalCost).string())
                    .col(
                        ColumnDef::new(Maintenances::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenances_vehicle")
                            .from(Maintenances::Table, Maintenances::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenances_vehicle")
                    .table(Maintenances::Table)
                    .col(Maintenances::VehicleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenances_status")
                    .table(Maintenances::Table)
                    .col(Maintenances::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Maintenances::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Maintenances {
    Table,
    Id,
    VehicleId,
    MaintenanceType,
    Description,
    Status,
    EstimatedCost,
    FinalCost,
    CreatedAt,
}
