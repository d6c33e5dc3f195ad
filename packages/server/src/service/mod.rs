//! Business services: orchestration between handlers and stores.

pub mod auth;
pub mod site_config;
pub mod vehicles;

pub use auth::{AuthResponse, AuthService, LoginRequest, SignupRequest};
pub use site_config::SiteConfigService;
pub use vehicles::VehicleService;
