//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod maintenance_repository;
pub mod repository_provider;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use rust_decimal::Decimal;

use crate::domain::DomainError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, DomainError> {
    raw.parse::<Decimal>()
        .map_err(|e| DomainError::Storage(format!("Corrupt {} value '{}': {}", column, raw, e)))
}
