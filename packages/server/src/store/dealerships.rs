//! The tenant directory.
//!
//! Unscoped by design: this is the store the subdomain gate resolves
//! against, before any tenant is bound. Read-mostly; writes happen only
//! at signup. Slug and email uniqueness are enforced with index-entry
//! reservation so two concurrent signups cannot both claim a name.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use autolot_core::model::Dealership;
use autolot_core::{DealershipId, Error, Slug};

/// In-memory dealership directory with unique-slug and unique-email
/// indexes.
pub struct DealershipStore {
    by_id: DashMap<DealershipId, Dealership>,
    slug_index: DashMap<Slug, DealershipId>,
    email_index: DashMap<String, DealershipId>,
}

impl DealershipStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_id: DashMap::new(),
            slug_index: DashMap::new(),
            email_index: DashMap::new(),
        }
    }

    /// Registers a new dealership, reserving its slug and email.
    ///
    /// # Errors
    ///
    /// [`Error::Conflict`] if the email or slug is already taken.
    pub fn insert(&self, dealership: Dealership) -> Result<Dealership, Error> {
        let email_key = dealership.email.to_lowercase();

        match self.email_index.entry(email_key.clone()) {
            Entry::Occupied(_) => return Err(Error::conflict("Email already exists")),
            Entry::Vacant(entry) => {
                entry.insert(dealership.id);
            }
        }

        match self.slug_index.entry(dealership.slug.clone()) {
            Entry::Occupied(_) => {
                // Unwind the email reservation taken above.
                self.email_index.remove(&email_key);
                return Err(Error::conflict("Slug already taken"));
            }
            Entry::Vacant(entry) => {
                entry.insert(dealership.id);
            }
        }

        self.by_id.insert(dealership.id, dealership.clone());
        Ok(dealership)
    }

    /// Looks a dealership up by its subdomain slug.
    #[must_use]
    pub fn find_by_slug(&self, slug: &Slug) -> Option<Dealership> {
        let id = *self.slug_index.get(slug)?;
        self.by_id.get(&id).map(|d| d.clone())
    }

    #[must_use]
    pub fn find_by_id(&self, id: DealershipId) -> Option<Dealership> {
        self.by_id.get(&id).map(|d| d.clone())
    }

    #[must_use]
    pub fn exists_by_email(&self, email: &str) -> bool {
        self.email_index.contains_key(&email.to_lowercase())
    }

    /// Unwinds a dealership created by a signup whose later steps failed.
    /// Not part of normal operation; tenants are otherwise never deleted.
    pub fn remove(&self, id: DealershipId) {
        if let Some((_, dealership)) = self.by_id.remove(&id) {
            self.slug_index.remove(&dealership.slug);
            self.email_index.remove(&dealership.email.to_lowercase());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for DealershipStore {
    fn default() -> Self {
        Self::new()
    }
}
