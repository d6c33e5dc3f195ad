//! Tenant-scoped site configuration store. Zero or one row per tenant.

use autolot_core::model::SiteConfig;
use autolot_core::{DealershipId, Error, SiteConfigId, TenantContext};

use super::scoped::{ScopedCollection, TenantOwned};

impl TenantOwned for SiteConfig {
    type Key = SiteConfigId;

    fn key(&self) -> SiteConfigId {
        self.id
    }

    fn dealership_id(&self) -> DealershipId {
        self.dealership_id
    }
}

pub struct SiteConfigStore {
    inner: ScopedCollection<SiteConfig>,
}

impl SiteConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ScopedCollection::new(),
        }
    }

    /// Stores the tenant's configuration (called once, at signup).
    ///
    /// # Errors
    ///
    /// Propagates the scoping errors of [`ScopedCollection::insert`].
    pub fn insert(&self, ctx: &TenantContext, config: SiteConfig) -> Result<SiteConfig, Error> {
        self.inner.insert(ctx, config)
    }

    /// The bound tenant's configuration.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::SiteConfigNotFound`] if the tenant has none.
    pub fn get(&self, ctx: &TenantContext) -> Result<SiteConfig, Error> {
        self.inner
            .find(ctx, |_| true)?
            .into_iter()
            .next()
            .ok_or(Error::SiteConfigNotFound)
    }

    /// Applies `apply` to the bound tenant's configuration.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::SiteConfigNotFound`] if the tenant has none.
    pub fn update(
        &self,
        ctx: &TenantContext,
        apply: impl FnOnce(&mut SiteConfig),
    ) -> Result<SiteConfig, Error> {
        let current = self.get(ctx)?;
        self.inner
            .update(ctx, current.id, apply)?
            .ok_or(Error::SiteConfigNotFound)
    }
}

impl Default for SiteConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn ctx_for(tenant: DealershipId) -> TenantContext {
        let mut ctx = TenantContext::new();
        ctx.bind_tenant(tenant);
        ctx
    }

    #[test]
    fn each_tenant_sees_only_its_own_config() {
        let store = SiteConfigStore::new();
        let a = DealershipId::new();
        let b = DealershipId::new();

        store
            .insert(&ctx_for(a), SiteConfig::default_for(a, Utc::now()))
            .unwrap();

        let mut b_config = SiteConfig::default_for(b, Utc::now());
        b_config.theme = "midnight".to_string();
        store.insert(&ctx_for(b), b_config).unwrap();

        assert_eq!(store.get(&ctx_for(a)).unwrap().theme, "default");
        assert_eq!(store.get(&ctx_for(b)).unwrap().theme, "midnight");
    }

    #[test]
    fn missing_config_reports_not_found() {
        let store = SiteConfigStore::new();
        assert!(matches!(
            store.get(&ctx_for(DealershipId::new())),
            Err(Error::SiteConfigNotFound)
        ));
    }

    #[test]
    fn unbound_context_fails_closed() {
        let store = SiteConfigStore::new();
        assert!(matches!(
            store.get(&TenantContext::new()),
            Err(Error::TenantContextMissing)
        ));
    }

    #[test]
    fn update_touches_only_the_bound_tenant() {
        let store = SiteConfigStore::new();
        let a = DealershipId::new();
        let b = DealershipId::new();
        store
            .insert(&ctx_for(a), SiteConfig::default_for(a, Utc::now()))
            .unwrap();
        store
            .insert(&ctx_for(b), SiteConfig::default_for(b, Utc::now()))
            .unwrap();

        store
            .update(&ctx_for(a), |c| c.theme = "neon".to_string())
            .unwrap();

        assert_eq!(store.get(&ctx_for(a)).unwrap().theme, "neon");
        assert_eq!(store.get(&ctx_for(b)).unwrap().theme, "default");
    }
}
