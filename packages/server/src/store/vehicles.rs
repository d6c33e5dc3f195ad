//! Tenant-scoped vehicle store.

use rust_decimal::Decimal;

use autolot_core::model::{Vehicle, VehicleStatus};
use autolot_core::{DealershipId, Error, TenantContext, VehicleId};

use super::scoped::{ScopedCollection, TenantOwned};

impl TenantOwned for Vehicle {
    type Key = VehicleId;

    fn key(&self) -> VehicleId {
        self.id
    }

    fn dealership_id(&self) -> DealershipId {
        self.dealership_id
    }
}

/// Vehicle listings, always accessed through the bound tenant.
///
/// Listing results are ordered newest-first, matching what the
/// storefront shows by default.
pub struct VehicleStore {
    inner: ScopedCollection<Vehicle>,
}

impl VehicleStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ScopedCollection::new(),
        }
    }

    /// Stores a new listing for the bound tenant.
    ///
    /// # Errors
    ///
    /// Propagates the scoping errors of
    /// [`ScopedCollection::insert`].
    pub fn insert(&self, ctx: &TenantContext, vehicle: Vehicle) -> Result<Vehicle, Error> {
        self.inner.insert(ctx, vehicle)
    }

    /// Fetches one listing; cross-tenant ids read as absent.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::VehicleNotFound`] for absent or foreign rows.
    pub fn get(&self, ctx: &TenantContext, id: VehicleId) -> Result<Vehicle, Error> {
        self.inner.get(ctx, id)?.ok_or(Error::VehicleNotFound)
    }

    /// All of the bound tenant's listings, newest first.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn list(&self, ctx: &TenantContext) -> Result<Vec<Vehicle>, Error> {
        let mut rows = self.inner.list(ctx)?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    /// Listings in the given status, newest first.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn find_by_status(
        &self,
        ctx: &TenantContext,
        status: VehicleStatus,
    ) -> Result<Vec<Vehicle>, Error> {
        let mut rows = self.inner.find(ctx, |v| v.status == status)?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    /// Featured listings only.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn find_featured(&self, ctx: &TenantContext) -> Result<Vec<Vehicle>, Error> {
        self.inner.find(ctx, |v| v.featured)
    }

    /// Exact-VIN lookup within the tenant.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn find_by_vin(&self, ctx: &TenantContext, vin: &str) -> Result<Option<Vehicle>, Error> {
        Ok(self
            .inner
            .find(ctx, |v| v.vin.as_deref() == Some(vin))?
            .into_iter()
            .next())
    }

    /// Listings priced at or below `ceiling`, cheapest first.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn find_price_at_most(
        &self,
        ctx: &TenantContext,
        ceiling: Decimal,
    ) -> Result<Vec<Vehicle>, Error> {
        let mut rows = self.inner.find(ctx, |v| v.price <= ceiling)?;
        rows.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(rows)
    }

    /// Applies `apply` to an owned listing.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::VehicleNotFound`] for absent or foreign rows.
    pub fn update(
        &self,
        ctx: &TenantContext,
        id: VehicleId,
        apply: impl FnOnce(&mut Vehicle),
    ) -> Result<Vehicle, Error> {
        self.inner
            .update(ctx, id, apply)?
            .ok_or(Error::VehicleNotFound)
    }

    /// Deletes an owned listing.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::VehicleNotFound`] for absent or foreign rows.
    pub fn remove(&self, ctx: &TenantContext, id: VehicleId) -> Result<Vehicle, Error> {
        self.inner
            .remove(ctx, id)?
            .ok_or(Error::VehicleNotFound)
    }
}

impl Default for VehicleStore {
    fn default() -> Self {
        Self::new()
    }
}
