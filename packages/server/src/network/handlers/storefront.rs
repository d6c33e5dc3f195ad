//! Public storefront handlers.
//!
//! Unauthenticated, driven entirely by the subdomain-bound tenant. These
//! routes are only reachable through a tenant subdomain; a request that
//! arrives with no tenant bound trips the store layer's fail-closed check
//! rather than ever seeing unscoped data.

use axum::extract::{Path, State};
use axum::Json;

use autolot_core::model::{SiteConfig, VehicleResponse};
use autolot_core::VehicleId;

use crate::error::ApiError;
use crate::tenant::RequestTenant;

use super::AppState;

/// `GET /api/public/vehicles` -- the dealership's available inventory.
pub async fn public_vehicles_handler(
    State(state): State<AppState>,
    RequestTenant(ctx): RequestTenant,
) -> Result<Json<Vec<VehicleResponse>>, ApiError> {
    Ok(Json(state.vehicles.list_available(&ctx)?))
}

/// `GET /api/public/vehicles/{id}`
pub async fn public_vehicle_handler(
    State(state): State<AppState>,
    RequestTenant(ctx): RequestTenant,
    Path(id): Path<VehicleId>,
) -> Result<Json<VehicleResponse>, ApiError> {
    Ok(Json(state.vehicles.get(&ctx, id)?))
}

/// `GET /api/public/site-config`
pub async fn public_site_config_handler(
    State(state): State<AppState>,
    RequestTenant(ctx): RequestTenant,
) -> Result<Json<SiteConfig>, ApiError> {
    Ok(Json(state.site_config.get(&ctx)?))
}
