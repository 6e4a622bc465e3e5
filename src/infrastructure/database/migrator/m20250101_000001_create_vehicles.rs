//! Create vehicles table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::LicensePlate)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vehicles::Brand).string_len(50).not_null())
                    .col(ColumnDef::new(Vehicles::Model).string_len(50).not_null())
                    .col(ColumnDef::new(Vehicles::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Vehicles::CurrentMileage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Plate uniqueness is enforced here, not only in the service
        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_license_plate")
                    .table(Vehicles::Table)
                    .col(Vehicles::LicensePlate)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    LicensePlate,
    Brand,
    Model,
    Year,
    CurrentMileage,
}
