//! The mandatory tenant filter, applied at the storage layer itself.
//!
//! Every read and write on a tenant-owned collection goes through
//! [`ScopedCollection`], which takes the request's [`TenantContext`] and
//! applies `row.dealership_id == bound tenant` as a non-optional
//! predicate. No call site can query around it, because the raw map is
//! never exposed.
//!
//! Two failure shapes matter:
//!
//! - Unbound context: the operation fails closed with
//!   [`Error::TenantContextMissing`]. Returning all-tenant data would be
//!   the one unrecoverable bug in this system.
//! - A row owned by another tenant: reads and writes both report `None`,
//!   exactly as if the row did not exist. Callers map that to their
//!   resource-specific not-found error, so a probing tenant cannot tell
//!   "absent" from "not yours".

use std::hash::Hash;

use dashmap::DashMap;

use autolot_core::{DealershipId, Error, TenantContext};

/// A row type owned by exactly one tenant.
pub trait TenantOwned {
    /// Primary key type.
    type Key: Eq + Hash + Copy + Send + Sync;

    fn key(&self) -> Self::Key;

    /// The owning tenant. Immutable for the row's lifetime.
    fn dealership_id(&self) -> DealershipId;
}

/// Concurrent in-memory collection of tenant-owned rows with the tenant
/// predicate built into every operation.
pub struct ScopedCollection<T: TenantOwned> {
    entries: DashMap<T::Key, T>,
}

impl<T: TenantOwned + Clone> ScopedCollection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// The bound tenant, or the fail-closed configuration error.
    fn require_tenant(ctx: &TenantContext) -> Result<DealershipId, Error> {
        ctx.tenant_id().ok_or(Error::TenantContextMissing)
    }

    /// Inserts a row owned by the bound tenant.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::Internal`] if the row claims a different owner than the
    /// context (a wiring bug, not a client condition).
    pub fn insert(&self, ctx: &TenantContext, row: T) -> Result<T, Error> {
        let tenant = Self::require_tenant(ctx)?;
        if row.dealership_id() != tenant {
            return Err(Error::internal(
                "attempted to insert a row owned by a different tenant than the bound context",
            ));
        }
        self.entries.insert(row.key(), row.clone());
        Ok(row)
    }

    /// Fetches a row by key within the bound tenant.
    ///
    /// `Ok(None)` covers both a genuinely absent key and a key owned by
    /// another tenant.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn get(&self, ctx: &TenantContext, key: T::Key) -> Result<Option<T>, Error> {
        let tenant = Self::require_tenant(ctx)?;
        Ok(self
            .entries
            .get(&key)
            .filter(|row| row.dealership_id() == tenant)
            .map(|row| row.clone()))
    }

    /// All rows owned by the bound tenant.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn list(&self, ctx: &TenantContext) -> Result<Vec<T>, Error> {
        self.find(ctx, |_| true)
    }

    /// Rows owned by the bound tenant that also satisfy `pred`.
    ///
    /// The tenant filter is applied first and unconditionally; `pred`
    /// can only narrow within the tenant, never widen past it.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn find(
        &self,
        ctx: &TenantContext,
        pred: impl Fn(&T) -> bool,
    ) -> Result<Vec<T>, Error> {
        let tenant = Self::require_tenant(ctx)?;
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.value().dealership_id() == tenant && pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    /// Mutates a row in place if it exists and is owned by the bound
    /// tenant, returning the updated row. `Ok(None)` otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn update(
        &self,
        ctx: &TenantContext,
        key: T::Key,
        apply: impl FnOnce(&mut T),
    ) -> Result<Option<T>, Error> {
        let tenant = Self::require_tenant(ctx)?;
        match self.entries.get_mut(&key) {
            Some(mut row) if row.dealership_id() == tenant => {
                apply(row.value_mut());
                Ok(Some(row.clone()))
            }
            _ => Ok(None),
        }
    }

    /// Removes a row if it exists and is owned by the bound tenant,
    /// returning it. `Ok(None)` otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn remove(&self, ctx: &TenantContext, key: T::Key) -> Result<Option<T>, Error> {
        let tenant = Self::require_tenant(ctx)?;
        Ok(self
            .entries
            .remove_if(&key, |_, row| row.dealership_id() == tenant)
            .map(|(_, row)| row))
    }

    /// Total rows across all tenants. Diagnostics only; never use this to
    /// answer a tenant-facing query.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.entries.len()
    }
}

impl<T: TenantOwned + Clone> Default for ScopedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
