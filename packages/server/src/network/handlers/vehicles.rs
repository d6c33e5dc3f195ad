//! Admin vehicle CRUD handlers. All require an authenticated admin and a
//! bound tenant; scoping itself happens in the store layer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use autolot_core::model::{VehicleRequest, VehicleResponse};
use autolot_core::VehicleId;

use crate::error::ApiError;
use crate::tenant::{RequestTenant, RequireAdmin};

use super::AppState;

/// `POST /api/admin/vehicles`
pub async fn create_vehicle_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    RequestTenant(ctx): RequestTenant,
    Json(request): Json<VehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), ApiError> {
    let response = state.vehicles.create(&ctx, request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/admin/vehicles`
pub async fn list_vehicles_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    RequestTenant(ctx): RequestTenant,
) -> Result<Json<Vec<VehicleResponse>>, ApiError> {
    Ok(Json(state.vehicles.list(&ctx)?))
}

/// `GET /api/admin/vehicles/{id}`
pub async fn get_vehicle_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    RequestTenant(ctx): RequestTenant,
    Path(id): Path<VehicleId>,
) -> Result<Json<VehicleResponse>, ApiError> {
    Ok(Json(state.vehicles.get(&ctx, id)?))
}

/// `PUT /api/admin/vehicles/{id}`
pub async fn update_vehicle_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    RequestTenant(ctx): RequestTenant,
    Path(id): Path<VehicleId>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<VehicleResponse>, ApiError> {
    Ok(Json(state.vehicles.update(&ctx, id, request)?))
}

/// `DELETE /api/admin/vehicles/{id}`
pub async fn delete_vehicle_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    RequestTenant(ctx): RequestTenant,
    Path(id): Path<VehicleId>,
) -> Result<StatusCode, ApiError> {
    state.vehicles.delete(&ctx, id)?;
    Ok(StatusCode::NO_CONTENT)
}
