//! HTTP mapping for the domain error taxonomy.
//!
//! Every handler returns `Result<_, ApiError>`; this module is the single
//! place where domain failures become status codes and the JSON error
//! envelope `{timestamp, status, error, message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{error, warn};

use autolot_core::Error;

/// Wrapper carrying a domain error to the response layer.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

/// Client-facing error envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    timestamp: chrono::DateTime<Utc>,
    status: u16,
    error: &'static str,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            Error::TenantNotFound { .. }
            | Error::DealershipNotFound
            | Error::VehicleNotFound
            | Error::SiteConfigNotFound
            | Error::AdminUserNotFound => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::InvalidCredentials | Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::TenantContextMissing | Error::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client. Server faults collapse to a generic
    /// line; their detail goes to the log, not the response.
    fn client_message(&self) -> String {
        match &self.0 {
            Error::TenantContextMissing | Error::Internal { .. } => {
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self.0 {
            Error::TenantContextMissing => {
                error!("tenant-scoped operation ran with no bound tenant");
            }
            Error::Internal { message } => error!(%message, "internal error"),
            Error::TenantNotFound { slug } => {
                warn!(slug = %slug, "request for unknown dealership subdomain");
            }
            _ => {}
        }

        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error"),
            message: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        let errs = [
            Error::TenantNotFound {
                slug: "ghost".to_string(),
            },
            Error::DealershipNotFound,
            Error::VehicleNotFound,
            Error::SiteConfigNotFound,
            Error::AdminUserNotFound,
        ];
        for err in errs {
            assert_eq!(ApiError(err).status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn auth_failures_map_to_401() {
        assert_eq!(
            ApiError(Error::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError(Error::Unauthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn context_missing_is_masked_500() {
        let err = ApiError(Error::TenantContextMissing);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "An unexpected error occurred");
    }

    #[test]
    fn conflict_and_validation_statuses() {
        assert_eq!(
            ApiError(Error::conflict("Email already exists")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError(Error::Validation {
                field: "slug",
                message: "bad".into()
            })
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
