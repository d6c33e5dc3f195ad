//! Dealership: the tenant entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::slug::Slug;
use crate::types::DealershipId;

/// A dealership account. The unit of isolation: admin users, vehicles,
/// and site configuration all hang off one of these.
///
/// Created once at signup and never deleted in normal operation;
/// deactivation flips `active` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dealership {
    pub id: DealershipId,
    pub name: String,
    /// Subdomain identifier, globally unique. Always lowercase: `Slug`
    /// normalizes on construction.
    pub slug: Slug,
    /// Contact email, globally unique.
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub about: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a dealership at signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDealership {
    pub name: String,
    pub slug: Slug,
    pub email: String,
}

impl Dealership {
    /// Materializes a new active dealership record.
    #[must_use]
    pub fn create(new: NewDealership, now: DateTime<Utc>) -> Self {
        Self {
            id: DealershipId::new(),
            name: new.name,
            slug: new.slug,
            email: new.email,
            phone: None,
            address: None,
            logo_url: None,
            about: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
