//! Vehicle DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{NewVehicle, Vehicle};
use crate::shared::validations::{validate_not_blank, LICENSE_PLATE_RE};

/// Vehicle details in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: Uuid,
    #[schema(example = "ABC-1234")]
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Odometer reading in kilometers
    pub current_mileage: i32,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            license_plate: v.license_plate,
            brand: v.brand,
            model: v.model,
            year: v.year,
            current_mileage: v.current_mileage,
        }
    }
}

/// Register a vehicle
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(
        length(max = 20, message = "License plate must not exceed 20 characters"),
        regex(
            path = *LICENSE_PLATE_RE,
            message = "License plate format is invalid. Expected format: ABC-1234 or ABC1234"
        )
    )]
    #[schema(example = "ABC-1234")]
    pub license_plate: String,

    #[validate(
        length(max = 50, message = "Brand must not exceed 50 characters"),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Toyota")]
    pub brand: String,

    #[validate(
        length(max = 50, message = "Model must not exceed 50 characters"),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Corolla")]
    pub model: String,

    #[validate(range(min = 1900, max = 2026, message = "Year must be between 1900 and 2026"))]
    #[schema(example = 2022)]
    pub year: i32,

    #[validate(range(min = 0, message = "Current mileage must be greater than or equal to 0"))]
    #[schema(example = 15000)]
    pub current_mileage: i32,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(r: CreateVehicleRequest) -> Self {
        Self {
            license_plate: r.license_plate,
            brand: r.brand,
            model: r.model,
            year: r.year,
            current_mileage: r.current_mileage,
        }
    }
}

/// New odometer reading
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMileageRequest {
    #[validate(range(min = 0, message = "Mileage must be greater than or equal to 0"))]
    #[schema(example = 18500)]
    pub current_mileage: i32,
}

/// Total cost of completed maintenances
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCostDto {
    pub license_plate: String,
    #[schema(value_type = String, example = "1250.50")]
    pub total_cost: Decimal,
}

/// Whether a vehicle is free of pending or in-progress work
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDto {
    pub license_plate: String,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateVehicleRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn well_formed_vehicle_passes() {
        let req = request(serde_json::json!({
            "licensePlate": "ABC-1234",
            "brand": "Toyota",
            "model": "Corolla",
            "year": 2022,
            "currentMileage": 0
        }));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn each_rule_reports_its_field() {
        let req = request(serde_json::json!({
            "licensePlate": "abc 1234",
            "brand": " ",
            "model": "M".repeat(51),
            "year": 1899,
            "currentMileage": -5
        }));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["license_plate", "brand", "model", "year", "current_mileage"] {
            assert!(fields.contains_key(field), "{field} should fail");
        }
    }

    #[test]
    fn plate_pattern_message_is_reported() {
        for plate in ["abc-1234", "A-1", "ABCDE-1234", "ABC--123", ""] {
            let req = request(serde_json::json!({
                "licensePlate": plate,
                "brand": "Toyota",
                "model": "Corolla",
                "year": 2022,
                "currentMileage": 0
            }));
            let errors = req.validate().unwrap_err();
            let fields = errors.field_errors();
            let plate_errors = fields["license_plate"];
            assert_eq!(plate_errors[0].code, "regex", "{plate}");
            assert_eq!(
                plate_errors[0].message.as_deref(),
                Some("License plate format is invalid. Expected format: ABC-1234 or ABC1234")
            );
        }
    }

    #[test]
    fn response_uses_camel_case() {
        let dto = VehicleDto {
            id: Uuid::nil(),
            license_plate: "ABC-1234".into(),
            brand: "BMW".into(),
            model: "135i".into(),
            year: 2022,
            current_mileage: 15000,
        };
        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(json["licensePlate"], "ABC-1234");
        assert_eq!(json["currentMileage"], 15000);
    }
}
