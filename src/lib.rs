//! # Fleet Maintenance
//!
//! Tracks a fleet of vehicles, their odometer readings and the maintenance
//! jobs opened against them.
//!
//! ## Architecture
//!
//! - **domain**: vehicles, maintenances, the status lifecycle and store ports
//! - **application**: services that enforce the rules on top of a store
//! - **infrastructure**: SeaORM/SQLite and in-memory store implementations
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process runtime (storage, listener, graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

pub use interfaces::http::{create_api_router, ApiState};
