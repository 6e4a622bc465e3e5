//! Domain services
//!
//! Pure business logic that spans more than a single entity.

pub mod fleet;

pub use fleet::{active_maintenances, is_available, total_completed_cost};
