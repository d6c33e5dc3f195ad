//! Admin user store.
//!
//! Unscoped: login receives only an email and must find the account --
//! and with it the tenant -- before any context exists. Email uniqueness
//! is global across tenants for exactly this reason.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use autolot_core::model::AdminUser;
use autolot_core::{AdminUserId, Error};

pub struct AdminUserStore {
    by_id: DashMap<AdminUserId, AdminUser>,
    email_index: DashMap<String, AdminUserId>,
}

impl AdminUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_id: DashMap::new(),
            email_index: DashMap::new(),
        }
    }

    /// Registers an admin user, reserving their email globally.
    ///
    /// # Errors
    ///
    /// [`Error::Conflict`] if the email is already registered to any
    /// admin of any tenant.
    pub fn insert(&self, user: AdminUser) -> Result<AdminUser, Error> {
        match self.email_index.entry(user.email.to_lowercase()) {
            Entry::Occupied(_) => Err(Error::conflict("Email already exists")),
            Entry::Vacant(entry) => {
                entry.insert(user.id);
                self.by_id.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<AdminUser> {
        let id = *self.email_index.get(&email.to_lowercase())?;
        self.by_id.get(&id).map(|u| u.clone())
    }

    #[must_use]
    pub fn find_by_id(&self, id: AdminUserId) -> Option<AdminUser> {
        self.by_id.get(&id).map(|u| u.clone())
    }

    #[must_use]
    pub fn exists_by_email(&self, email: &str) -> bool {
        self.email_index.contains_key(&email.to_lowercase())
    }
}

impl Default for AdminUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use autolot_core::model::NewAdminUser;
    use autolot_core::{AdminRole, DealershipId};

    use super::*;

    fn user(email: &str) -> AdminUser {
        AdminUser::create(
            NewAdminUser {
                dealership_id: DealershipId::new(),
                email: email.to_string(),
                password_hash: "$argon2id$stub".to_string(),
                full_name: "Test Admin".to_string(),
                role: AdminRole::Owner,
            },
            Utc::now(),
        )
    }

    #[test]
    fn insert_then_find_by_email() {
        let store = AdminUserStore::new();
        let inserted = store.insert(user("owner@acme.test")).unwrap();

        let found = store.find_by_email("owner@acme.test").unwrap();
        assert_eq!(found.id, inserted.id);
        // Case-insensitive lookup.
        assert!(store.find_by_email("Owner@Acme.Test").is_some());
    }

    #[test]
    fn email_unique_across_tenants() {
        let store = AdminUserStore::new();
        store.insert(user("owner@acme.test")).unwrap();

        // Same email from a different dealership still conflicts.
        let result = store.insert(user("owner@acme.test"));
        assert!(matches!(result, Err(Error::Conflict { .. })));
    }

    #[test]
    fn unknown_email_is_none() {
        let store = AdminUserStore::new();
        assert!(store.find_by_email("ghost@nowhere.test").is_none());
    }
}
