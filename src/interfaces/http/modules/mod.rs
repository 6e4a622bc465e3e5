pub mod health;
pub mod maintenances;
pub mod metrics;
pub mod request_id;
pub mod vehicles;
