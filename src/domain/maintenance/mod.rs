//! Maintenance entity
//!
//! Contains the Maintenance entity, its status state machine, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{Maintenance, MaintenanceStatus, MaintenanceType, NewMaintenance};
pub use repository::MaintenanceRepository;
