//! Admin user identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AdminRole, AdminUserId, DealershipId};

/// An administrator of one dealership.
///
/// `dealership_id` is immutable after creation; admins never move between
/// tenants. `email` is unique across ALL tenants because login looks
/// users up globally, before any tenant is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub dealership_id: DealershipId,
    pub email: String,
    /// Argon2id hash in PHC string format. Never serialized to clients;
    /// the server crate keeps this type out of response bodies.
    pub password_hash: String,
    pub full_name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an admin user.
#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub dealership_id: DealershipId,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: AdminRole,
}

impl AdminUser {
    /// Materializes a new admin user record.
    #[must_use]
    pub fn create(new: NewAdminUser, now: DateTime<Utc>) -> Self {
        Self {
            id: AdminUserId::new(),
            dealership_id: new.dealership_id,
            email: new.email,
            password_hash: new.password_hash,
            full_name: new.full_name,
            role: new.role,
            created_at: now,
            updated_at: now,
        }
    }
}
