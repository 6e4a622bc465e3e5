//! Maintenance HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::MaintenanceService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for maintenance handlers.
#[derive(Clone)]
pub struct MaintenanceAppState {
    pub maintenances: Arc<MaintenanceService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{license_plate}/maintenances",
    tag = "Maintenances",
    params(("license_plate" = String, Path, description = "License plate")),
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "Maintenance registered as PENDING", body = ApiResponse<MaintenanceDto>),
        (status = 404, description = "Vehicle not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register_maintenance(
    State(state): State<MaintenanceAppState>,
    Path(license_plate): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceDto>>), ApiError<MaintenanceDto>> {
    let maintenance = state
        .maintenances
        .register(&license_plate, request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MaintenanceDto::from(maintenance))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/maintenances/{id}",
    tag = "Maintenances",
    params(("id" = Uuid, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance details", body = ApiResponse<MaintenanceDto>),
        (status = 404, description = "Maintenance not found")
    )
)]
pub async fn get_maintenance(
    State(state): State<MaintenanceAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MaintenanceDto>>, ApiError<MaintenanceDto>> {
    let maintenance = state.maintenances.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(maintenance.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/maintenances/{id}/status",
    tag = "Maintenances",
    params(("id" = Uuid, Path, description = "Maintenance ID")),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<MaintenanceDto>),
        (status = 400, description = "Transition not allowed or final cost missing"),
        (status = 404, description = "Maintenance not found"),
        (status = 409, description = "Concurrent update, retry")
    )
)]
pub async fn change_status(
    State(state): State<MaintenanceAppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ChangeStatusRequest>,
) -> Result<Json<ApiResponse<MaintenanceDto>>, ApiError<MaintenanceDto>> {
    let maintenance = state
        .maintenances
        .change_status(id, request.new_status, request.final_cost)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(maintenance.into())))
}
