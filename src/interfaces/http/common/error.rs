//! Domain error to HTTP status mapping

use axum::http::StatusCode;
use axum::Json;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler's `Result`.
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::VehicleNotFound(_) | DomainError::MaintenanceNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        DomainError::DuplicateLicensePlate(_) | DomainError::ConcurrentModification { .. } => {
            StatusCode::CONFLICT
        }
        DomainError::InvalidMileage { .. } | DomainError::InvalidStateTransition(_) => {
            StatusCode::BAD_REQUEST
        }
        DomainError::CostOverflow(_) | DomainError::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Convert a domain error into an error envelope.
///
/// Storage failures are logged and replaced by a generic message.
pub fn domain_error<T>(err: DomainError) -> ApiError<T> {
    let status = status_for(&err);
    let message = match &err {
        DomainError::Storage(detail) => {
            tracing::error!(error = %detail, "Storage failure while handling request");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MaintenanceStatus, TransitionError};
    use uuid::Uuid;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (DomainError::VehicleNotFound("A".into()), StatusCode::NOT_FOUND),
            (DomainError::MaintenanceNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::DuplicateLicensePlate("A".into()), StatusCode::CONFLICT),
            (
                DomainError::ConcurrentModification {
                    entity: "Vehicle",
                    id: "A".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                DomainError::InvalidMileage {
                    license_plate: "A".into(),
                    current: 2,
                    new: 1,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                TransitionError::NotAllowed {
                    from: MaintenanceStatus::Completed,
                    to: MaintenanceStatus::Pending,
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::CostOverflow("A".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(status_for(&err), expected, "{err}");
        }
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let (status, Json(body)) = domain_error::<()>(DomainError::Storage("secret dsn".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
