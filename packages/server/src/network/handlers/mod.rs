//! HTTP handler definitions.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod auth;
pub mod health;
pub mod site_config;
pub mod storefront;
pub mod vehicles;

pub use auth::{login_handler, signup_handler};
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use site_config::{get_site_config_handler, update_site_config_handler};
pub use storefront::{
    public_site_config_handler, public_vehicle_handler, public_vehicles_handler,
};
pub use vehicles::{
    create_vehicle_handler, delete_vehicle_handler, get_vehicle_handler, list_vehicles_handler,
    update_vehicle_handler,
};

use std::sync::Arc;
use std::time::Instant;

use autolot_core::Error;

use crate::auth::{AuthConfig, TokenService};
use crate::network::ShutdownController;
use crate::service::{AuthService, SiteConfigService, VehicleService};
use crate::store::{AdminUserStore, DealershipStore, SiteConfigStore, VehicleStore};

/// Shared application state passed to all axum handlers via `State`
/// extraction, and to the tenant gates.
///
/// Holds `Arc` references to shared resources so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Tenant directory, read by the subdomain gate.
    pub dealerships: Arc<DealershipStore>,
    /// Token issuer/validator, read by the token gate.
    pub tokens: Arc<TokenService>,
    /// Signup/login flows.
    pub auth: Arc<AuthService>,
    /// Tenant-scoped vehicle CRUD.
    pub vehicles: Arc<VehicleService>,
    /// Tenant-scoped site configuration.
    pub site_config: Arc<SiteConfigService>,
    /// Graceful shutdown controller with health state.
    pub shutdown: Arc<ShutdownController>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Wires up stores, services, and the token service.
    ///
    /// # Errors
    ///
    /// Fails fast if the auth configuration is invalid (weak signing
    /// secret, zero TTL) -- the server must not come up in that state.
    pub fn new(auth_config: &AuthConfig, shutdown: Arc<ShutdownController>) -> Result<Self, Error> {
        let tokens = Arc::new(TokenService::new(auth_config)?);

        let dealerships = Arc::new(DealershipStore::new());
        let admin_users = Arc::new(AdminUserStore::new());
        let vehicle_store = Arc::new(VehicleStore::new());
        let site_configs = Arc::new(SiteConfigStore::new());

        let auth = Arc::new(AuthService::new(
            Arc::clone(&dealerships),
            admin_users,
            Arc::clone(&site_configs),
            Arc::clone(&tokens),
        ));
        let vehicles = Arc::new(VehicleService::new(
            Arc::clone(&dealerships),
            vehicle_store,
        ));
        let site_config = Arc::new(SiteConfigService::new(site_configs));

        Ok(Self {
            dealerships,
            tokens,
            auth,
            vehicles,
            site_config,
            shutdown,
            start_time: Instant::now(),
        })
    }
}
