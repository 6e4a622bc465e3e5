//! Application layer: use-case services over the repository ports.

pub mod services;

pub use services::{FleetViewService, MaintenanceService, VehicleService};
