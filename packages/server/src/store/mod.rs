//! In-memory data access.
//!
//! Two kinds of store live here. [`DealershipStore`] and
//! [`AdminUserStore`] are deliberately unscoped: the tenant directory is
//! what resolution reads, and login must look admins up before any tenant
//! is known. Everything else is tenant-owned and goes through
//! [`ScopedCollection`], which makes the tenant filter impossible to
//! forget rather than easy to remember.

pub mod admin_users;
pub mod dealerships;
pub mod scoped;
pub mod site_configs;
pub mod vehicles;

pub use admin_users::AdminUserStore;
pub use dealerships::DealershipStore;
pub use scoped::{ScopedCollection, TenantOwned};
pub use site_configs::SiteConfigStore;
pub use vehicles::VehicleStore;
