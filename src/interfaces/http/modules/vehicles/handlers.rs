//! Vehicle HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::{FleetViewService, VehicleService};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::maintenances::MaintenanceDto;

use super::dto::*;

/// Application state for vehicle handlers.
#[derive(Clone)]
pub struct VehicleAppState {
    pub vehicles: Arc<VehicleService>,
    pub fleet: Arc<FleetViewService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered", body = ApiResponse<VehicleDto>),
        (status = 409, description = "License plate already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register_vehicle(
    State(state): State<VehicleAppState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), ApiError<VehicleDto>> {
    let vehicle = state
        .vehicles
        .register(request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleDto::from(vehicle))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{license_plate}",
    tag = "Vehicles",
    params(("license_plate" = String, Path, description = "License plate")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleAppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<ApiResponse<VehicleDto>>, ApiError<VehicleDto>> {
    let vehicle = state
        .vehicles
        .get_by_plate(&license_plate)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/vehicles/{license_plate}/mileage",
    tag = "Vehicles",
    params(("license_plate" = String, Path, description = "License plate")),
    request_body = UpdateMileageRequest,
    responses(
        (status = 200, description = "Mileage updated", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Mileage not greater than current"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Concurrent update, retry")
    )
)]
pub async fn update_mileage(
    State(state): State<VehicleAppState>,
    Path(license_plate): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMileageRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, ApiError<VehicleDto>> {
    let vehicle = state
        .vehicles
        .update_mileage(&license_plate, request.current_mileage)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{license_plate}/maintenances",
    tag = "Vehicles",
    params(("license_plate" = String, Path, description = "License plate")),
    responses(
        (status = 200, description = "All maintenances in attachment order", body = ApiResponse<Vec<MaintenanceDto>>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn list_maintenances(
    State(state): State<VehicleAppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<ApiResponse<Vec<MaintenanceDto>>>, ApiError<Vec<MaintenanceDto>>> {
    let history = state
        .vehicles
        .maintenances(&license_plate)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        history.into_iter().map(MaintenanceDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{license_plate}/maintenances/active",
    tag = "Vehicles",
    params(("license_plate" = String, Path, description = "License plate")),
    responses(
        (status = 200, description = "Pending and in-progress maintenances", body = ApiResponse<Vec<MaintenanceDto>>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn list_active_maintenances(
    State(state): State<VehicleAppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<ApiResponse<Vec<MaintenanceDto>>>, ApiError<Vec<MaintenanceDto>>> {
    let active = state
        .fleet
        .active_maintenances(&license_plate)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        active.into_iter().map(MaintenanceDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{license_plate}/maintenance-cost",
    tag = "Vehicles",
    params(("license_plate" = String, Path, description = "License plate")),
    responses(
        (status = 200, description = "Total cost of completed maintenances", body = ApiResponse<MaintenanceCostDto>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_maintenance_cost(
    State(state): State<VehicleAppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<ApiResponse<MaintenanceCostDto>>, ApiError<MaintenanceCostDto>> {
    let total_cost = state
        .fleet
        .total_completed_cost(&license_plate)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(MaintenanceCostDto {
        license_plate,
        total_cost,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{license_plate}/availability",
    tag = "Vehicles",
    params(("license_plate" = String, Path, description = "License plate")),
    responses(
        (status = 200, description = "Availability", body = ApiResponse<AvailabilityDto>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_availability(
    State(state): State<VehicleAppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<ApiResponse<AvailabilityDto>>, ApiError<AvailabilityDto>> {
    let available = state
        .fleet
        .is_available(&license_plate)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(AvailabilityDto {
        license_plate,
        available,
    })))
}
