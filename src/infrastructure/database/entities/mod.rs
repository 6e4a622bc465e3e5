//! Database entities module

pub mod maintenance;
pub mod vehicle;

pub use maintenance::Entity as Maintenance;
pub use vehicle::Entity as Vehicle;
