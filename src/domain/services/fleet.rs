//! Read-only derivations over a vehicle's maintenance history.

use rust_decimal::Decimal;

use crate::domain::maintenance::{Maintenance, MaintenanceStatus};

/// Pending and in-progress maintenances, preserving attachment order.
pub fn active_maintenances(history: &[Maintenance]) -> Vec<Maintenance> {
    history
        .iter()
        .filter(|m| m.status.is_active())
        .cloned()
        .collect()
}

/// Sum of final costs over completed maintenances.
///
/// Completed records without a final cost (legacy rows) contribute
/// nothing. Zero when nothing qualifies, `None` when the sum does not fit
/// in a `Decimal`.
pub fn total_completed_cost(history: &[Maintenance]) -> Option<Decimal> {
    history
        .iter()
        .filter(|m| m.status == MaintenanceStatus::Completed)
        .filter_map(|m| m.final_cost)
        .try_fold(Decimal::ZERO, |total, cost| total.checked_add(cost))
}

/// A vehicle is available when none of its maintenances is active.
pub fn is_available(history: &[Maintenance]) -> bool {
    !history.iter().any(|m| m.status.is_active())
}
