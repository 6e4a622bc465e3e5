//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{FleetViewService, MaintenanceService, VehicleService};
use crate::domain::RepositoryProvider;

use super::common::ApiResponse;
use super::modules::health::{self, HealthState};
use super::modules::maintenances::{self, MaintenanceAppState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::vehicles::{self, VehicleAppState};

/// Unified state for every `/api/v1` route.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub vehicles: Arc<VehicleService>,
    pub maintenances: Arc<MaintenanceService>,
    pub fleet: Arc<FleetViewService>,
}

impl ApiState {
    /// Build all services over one store.
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            vehicles: Arc::new(VehicleService::new(repos.clone())),
            maintenances: Arc::new(MaintenanceService::new(repos.clone())),
            fleet: Arc::new(FleetViewService::new(repos)),
        }
    }
}

impl FromRef<ApiState> for VehicleAppState {
    fn from_ref(s: &ApiState) -> Self {
        VehicleAppState {
            vehicles: Arc::clone(&s.vehicles),
            fleet: Arc::clone(&s.fleet),
        }
    }
}

impl FromRef<ApiState> for MaintenanceAppState {
    fn from_ref(s: &ApiState) -> Self {
        MaintenanceAppState {
            maintenances: Arc::clone(&s.maintenances),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Vehicles
        vehicles::register_vehicle,
        vehicles::get_vehicle,
        vehicles::update_mileage,
        vehicles::list_maintenances,
        vehicles::list_active_maintenances,
        vehicles::get_maintenance_cost,
        vehicles::get_availability,
        // Maintenances
        maintenances::register_maintenance,
        maintenances::get_maintenance,
        maintenances::change_status,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            vehicles::VehicleDto,
            vehicles::CreateVehicleRequest,
            vehicles::UpdateMileageRequest,
            vehicles::MaintenanceCostDto,
            vehicles::AvailabilityDto,
            maintenances::MaintenanceDto,
            crate::domain::MaintenanceType,
            crate::domain::MaintenanceStatus,
            maintenances::CreateMaintenanceRequest,
            maintenances::ChangeStatusRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Vehicles", description = "Vehicle registry, mileage tracking and fleet views"),
        (name = "Maintenances", description = "Maintenance registration and lifecycle"),
    ),
    info(
        title = "Fleet Maintenance API",
        version = "1.0.0",
        description = "Track vehicles, their mileage and their maintenance work",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(
    state: ApiState,
    health_state: HealthState,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let vehicle_routes = Router::new()
        .route("/", post(vehicles::register_vehicle))
        .route("/{license_plate}", get(vehicles::get_vehicle))
        .route("/{license_plate}/mileage", patch(vehicles::update_mileage))
        .route(
            "/{license_plate}/maintenances",
            get(vehicles::list_maintenances).post(maintenances::register_maintenance),
        )
        .route(
            "/{license_plate}/maintenances/active",
            get(vehicles::list_active_maintenances),
        )
        .route(
            "/{license_plate}/maintenance-cost",
            get(vehicles::get_maintenance_cost),
        )
        .route(
            "/{license_plate}/availability",
            get(vehicles::get_availability),
        )
        .with_state(state.clone());

    let maintenance_routes = Router::new()
        .route("/{id}", get(maintenances::get_maintenance))
        .route("/{id}/status", patch(maintenances::change_status))
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1/vehicles", vehicle_routes)
        .nest("/api/v1/maintenances", maintenance_routes);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
