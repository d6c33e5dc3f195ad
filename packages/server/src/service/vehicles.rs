//! Vehicle CRUD with explicit DTO mapping.
//!
//! Handlers never see the entity; everything crossing this boundary is a
//! [`VehicleRequest`] or [`VehicleResponse`]. Tenant scoping is supplied
//! entirely by the store layer -- this service only reads the context to
//! stamp ownership on new rows.

use std::sync::Arc;

use chrono::Utc;

use autolot_core::model::{VehicleRequest, VehicleResponse, VehicleStatus};
use autolot_core::{Error, TenantContext, VehicleId};

use crate::store::{DealershipStore, VehicleStore};

pub struct VehicleService {
    dealerships: Arc<DealershipStore>,
    vehicles: Arc<VehicleStore>,
}

impl VehicleService {
    #[must_use]
    pub fn new(dealerships: Arc<DealershipStore>, vehicles: Arc<VehicleStore>) -> Self {
        Self {
            dealerships,
            vehicles,
        }
    }

    /// Creates a listing for the bound tenant. Status starts `Available`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a bad payload;
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::DealershipNotFound`] if the bound tenant no longer
    /// resolves to a dealership record.
    pub fn create(
        &self,
        ctx: &TenantContext,
        request: VehicleRequest,
    ) -> Result<VehicleResponse, Error> {
        request.validate()?;

        let tenant = ctx.tenant_id().ok_or(Error::TenantContextMissing)?;
        if self.dealerships.find_by_id(tenant).is_none() {
            return Err(Error::DealershipNotFound);
        }

        let vehicle = request.into_vehicle(tenant, Utc::now());
        let stored = self.vehicles.insert(ctx, vehicle)?;
        Ok(stored.into())
    }

    /// All listings for the bound tenant, newest first.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn list(&self, ctx: &TenantContext) -> Result<Vec<VehicleResponse>, Error> {
        Ok(self
            .vehicles
            .list(ctx)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Available listings only, for the public storefront.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant.
    pub fn list_available(&self, ctx: &TenantContext) -> Result<Vec<VehicleResponse>, Error> {
        Ok(self
            .vehicles
            .find_by_status(ctx, VehicleStatus::Available)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// One listing by id.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::VehicleNotFound`] for absent or foreign ids.
    pub fn get(&self, ctx: &TenantContext, id: VehicleId) -> Result<VehicleResponse, Error> {
        self.vehicles.get(ctx, id).map(Into::into)
    }

    /// Replaces a listing's editable fields.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a bad payload;
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::VehicleNotFound`] for absent or foreign ids.
    pub fn update(
        &self,
        ctx: &TenantContext,
        id: VehicleId,
        request: VehicleRequest,
    ) -> Result<VehicleResponse, Error> {
        request.validate()?;
        let now = Utc::now();
        self.vehicles
            .update(ctx, id, move |vehicle| request.apply_to(vehicle, now))
            .map(Into::into)
    }

    /// Deletes a listing.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::VehicleNotFound`] for absent or foreign ids.
    pub fn delete(&self, ctx: &TenantContext, id: VehicleId) -> Result<(), Error> {
        self.vehicles.remove(ctx, id).map(|_| ())
    }
}
