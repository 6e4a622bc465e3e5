//! Maintenance domain entity and status state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::errors::TransitionError;

/// Kind of work performed on a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceType {
    OilChange,
    Brakes,
    Tires,
    Engine,
    Transmission,
    Electrical,
    Suspension,
    Inspection,
    Other,
}

impl MaintenanceType {
    pub const ALL: [Self; 9] = [
        Self::OilChange,
        Self::Brakes,
        Self::Tires,
        Self::Engine,
        Self::Transmission,
        Self::Electrical,
        Self::Suspension,
        Self::Inspection,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OilChange => "OIL_CHANGE",
            Self::Brakes => "BRAKES",
            Self::Tires => "TIRES",
            Self::Engine => "ENGINE",
            Self::Transmission => "TRANSMISSION",
            Self::Electrical => "ELECTRICAL",
            Self::Suspension => "SUSPENSION",
            Self::Inspection => "INSPECTION",
            Self::Other => "OTHER",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maintenance lifecycle status
///
/// ```text
/// PENDING ──► IN_PROGRESS ──► COMPLETED
///    │             │
///    └─────────────┴────────► CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    /// Registered, work not started
    Pending,
    /// Work underway
    InProgress,
    /// Work finished, final cost recorded
    Completed,
    /// Abandoned before completion
    Cancelled,
}

impl MaintenanceStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Transition table: the statuses reachable in one step from `self`.
    pub fn allowed_transitions(self) -> &'static [MaintenanceStatus] {
        use MaintenanceStatus::*;
        match self {
            Pending => &[InProgress, Cancelled],
            InProgress => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: MaintenanceStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Pending or in progress; the vehicle is tied up while any exist.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maintenance data supplied by the caller at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaintenance {
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub estimated_cost: Decimal,
}

/// Maintenance work item attached to one vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maintenance {
    /// Unique maintenance ID
    pub id: Uuid,
    /// Owning vehicle, fixed at creation
    pub vehicle_id: Uuid,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    /// Set once when the record is created
    pub created_at: DateTime<Utc>,
    pub status: MaintenanceStatus,
    pub estimated_cost: Decimal,
    /// Present iff `status == Completed`
    pub final_cost: Option<Decimal>,
}

impl Maintenance {
    pub fn new(vehicle_id: Uuid, draft: NewMaintenance) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            maintenance_type: draft.maintenance_type,
            description: draft.description,
            created_at: Utc::now(),
            status: MaintenanceStatus::Pending,
            estimated_cost: draft.estimated_cost,
            final_cost: None,
        }
    }

    /// Move to `next`, recording `final_cost` when completing.
    ///
    /// On error `self` is left untouched. A cost passed for any target
    /// other than `Completed` is ignored.
    pub fn apply_status(
        &mut self,
        next: MaintenanceStatus,
        final_cost: Option<Decimal>,
    ) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError::NotAllowed {
                from: self.status,
                to: next,
            });
        }

        if next == MaintenanceStatus::Completed {
            let cost = final_cost.ok_or(TransitionError::FinalCostRequired)?;
            if cost <= Decimal::ZERO {
                return Err(TransitionError::NonPositiveFinalCost(cost));
            }
            self.final_cost = Some(cost);
        }

        self.status = next;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
