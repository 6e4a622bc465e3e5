//! Read-only fleet queries per vehicle

use std::sync::Arc;

use rust_decimal::Decimal;

use super::require_vehicle;
use crate::domain::services::fleet;
use crate::domain::{DomainError, DomainResult, Maintenance, RepositoryProvider};

pub struct FleetViewService {
    repos: Arc<dyn RepositoryProvider>,
}

impl FleetViewService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn history(&self, plate: &str) -> DomainResult<Vec<Maintenance>> {
        let vehicle = require_vehicle(self.repos.as_ref(), plate).await?;
        self.repos.maintenances().find_by_vehicle(vehicle.id).await
    }

    pub async fn active_maintenances(&self, plate: &str) -> DomainResult<Vec<Maintenance>> {
        Ok(fleet::active_maintenances(&self.history(plate).await?))
    }

    pub async fn total_completed_cost(&self, plate: &str) -> DomainResult<Decimal> {
        fleet::total_completed_cost(&self.history(plate).await?)
            .ok_or_else(|| DomainError::CostOverflow(plate.to_string()))
    }

    pub async fn is_available(&self, plate: &str) -> DomainResult<bool> {
        Ok(fleet::is_available(&self.history(plate).await?))
    }
}
