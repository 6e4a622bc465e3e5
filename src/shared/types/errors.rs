use thiserror::Error;
use uuid::Uuid;

use crate::domain::maintenance::MaintenanceStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Vehicle with license plate '{0}' not found")]
    VehicleNotFound(String),

    #[error("Maintenance with id '{0}' not found")]
    MaintenanceNotFound(Uuid),

    #[error("Vehicle with license plate '{0}' already exists")]
    DuplicateLicensePlate(String),

    #[error(
        "Cannot update mileage for vehicle '{license_plate}': new mileage ({new}) must be greater than current ({current})"
    )]
    InvalidMileage {
        license_plate: String,
        current: i32,
        new: i32,
    },

    #[error(transparent)]
    InvalidStateTransition(#[from] TransitionError),

    #[error("{entity} {id} was modified concurrently, please retry")]
    ConcurrentModification { entity: &'static str, id: String },

    #[error("Total maintenance cost for vehicle '{0}' exceeds the representable range")]
    CostOverflow(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Reasons a maintenance status change is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid state transition from {from} to {to}")]
    NotAllowed {
        from: MaintenanceStatus,
        to: MaintenanceStatus,
    },

    #[error("Final cost is required when completing a maintenance")]
    FinalCostRequired,

    #[error("Final cost must be positive, got {0}")]
    NonPositiveFinalCost(rust_decimal::Decimal),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn not_found_messages_carry_identifiers() {
        let err = DomainError::VehicleNotFound("ABC-1234".into());
        assert_eq!(
            err.to_string(),
            "Vehicle with license plate 'ABC-1234' not found"
        );

        let id = Uuid::nil();
        let err = DomainError::MaintenanceNotFound(id);
        assert_eq!(
            err.to_string(),
            format!("Maintenance with id '{}' not found", id)
        );
    }

    #[test]
    fn mileage_message_reproduces_both_values() {
        let err = DomainError::InvalidMileage {
            license_plate: "ABC-1234".into(),
            current: 15000,
            new: 14000,
        };
        assert_eq!(
            err.to_string(),
            "Cannot update mileage for vehicle 'ABC-1234': new mileage (14000) must be greater than current (15000)"
        );
    }

    #[test]
    fn transition_messages_are_distinct() {
        let illegal: DomainError = TransitionError::NotAllowed {
            from: MaintenanceStatus::Pending,
            to: MaintenanceStatus::Completed,
        }
        .into();
        assert_eq!(
            illegal.to_string(),
            "Invalid state transition from PENDING to COMPLETED"
        );

        let missing: DomainError = TransitionError::FinalCostRequired.into();
        assert_eq!(
            missing.to_string(),
            "Final cost is required when completing a maintenance"
        );

        let negative: DomainError = TransitionError::NonPositiveFinalCost(Decimal::from(-5)).into();
        assert!(negative.to_string().contains("-5"));
    }
}
