//! Vehicle domain entity

use uuid::Uuid;

/// Vehicle data supplied by the caller at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub current_mileage: i32,
}

/// Registered vehicle.
///
/// Maintenance records are not embedded; they reference the vehicle by
/// `id` and are loaded through the maintenance repository in attachment
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    /// Unique vehicle ID
    pub id: Uuid,
    /// License plate, unique across the fleet and never changed
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    /// Manufacturing year
    pub year: i32,
    /// Odometer reading in kilometers
    pub current_mileage: i32,
}

impl Vehicle {
    pub fn new(draft: NewVehicle) -> Self {
        Self {
            id: Uuid::new_v4(),
            license_plate: draft.license_plate,
            brand: draft.brand,
            model: draft.model,
            year: draft.year,
            current_mileage: draft.current_mileage,
        }
    }

    /// Mileage may only move strictly forward.
    pub fn accepts_mileage(&self, new_mileage: i32) -> bool {
        new_mileage > self.current_mileage
    }
}
