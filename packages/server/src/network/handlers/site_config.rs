//! Admin site-configuration handlers.

use axum::extract::State;
use axum::Json;

use autolot_core::model::{SiteConfig, SiteConfigUpdate};

use crate::error::ApiError;
use crate::tenant::{RequestTenant, RequireAdmin};

use super::AppState;

/// `GET /api/admin/site-config`
pub async fn get_site_config_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    RequestTenant(ctx): RequestTenant,
) -> Result<Json<SiteConfig>, ApiError> {
    Ok(Json(state.site_config.get(&ctx)?))
}

/// `PUT /api/admin/site-config`
pub async fn update_site_config_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    RequestTenant(ctx): RequestTenant,
    Json(update): Json<SiteConfigUpdate>,
) -> Result<Json<SiteConfig>, ApiError> {
    Ok(Json(state.site_config.update(&ctx, update)?))
}
