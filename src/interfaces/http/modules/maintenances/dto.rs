//! Maintenance DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Maintenance, MaintenanceStatus, MaintenanceType, NewMaintenance};
use crate::shared::validations::{validate_not_blank, validate_positive_amount};

/// Maintenance details in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDto {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub creation_date: DateTime<Utc>,
    pub status: MaintenanceStatus,
    #[schema(value_type = String, example = "150.00")]
    pub estimated_cost: Decimal,
    /// Present only once the maintenance is completed
    #[schema(value_type = Option<String>, example = "175.50")]
    pub final_cost: Option<Decimal>,
}

impl From<Maintenance> for MaintenanceDto {
    fn from(m: Maintenance) -> Self {
        Self {
            id: m.id,
            vehicle_id: m.vehicle_id,
            maintenance_type: m.maintenance_type,
            description: m.description,
            creation_date: m.created_at,
            status: m.status,
            estimated_cost: m.estimated_cost,
            final_cost: m.final_cost,
        }
    }
}

/// Register a maintenance for a vehicle
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    #[validate(
        length(max = 500, message = "Description must not exceed 500 characters"),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Regular oil change and filter replacement")]
    pub description: String,
    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(value_type = String, example = "150.00")]
    pub estimated_cost: Decimal,
}

impl From<CreateMaintenanceRequest> for NewMaintenance {
    fn from(r: CreateMaintenanceRequest) -> Self {
        Self {
            maintenance_type: r.maintenance_type,
            description: r.description,
            estimated_cost: r.estimated_cost,
        }
    }
}

/// Move a maintenance to a new status
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    #[schema(example = "IN_PROGRESS")]
    pub new_status: MaintenanceStatus,
    /// Required only when completing
    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(value_type = Option<String>, example = "175.50")]
    pub final_cost: Option<Decimal>,
}
