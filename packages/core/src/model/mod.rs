//! Domain entities and request/response DTOs.

pub mod admin_user;
pub mod dealership;
pub mod site_config;
pub mod vehicle;

pub use admin_user::{AdminUser, NewAdminUser};
pub use dealership::{Dealership, NewDealership};
pub use site_config::{SiteConfig, SiteConfigUpdate};
pub use vehicle::{
    BodyType, FuelType, Transmission, Vehicle, VehicleCondition, VehicleImage, VehicleRequest,
    VehicleResponse, VehicleStatus,
};
