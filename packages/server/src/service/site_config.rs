//! Site configuration read/update for the bound tenant.

use std::sync::Arc;

use chrono::Utc;

use autolot_core::model::{SiteConfig, SiteConfigUpdate};
use autolot_core::{Error, TenantContext};

use crate::store::SiteConfigStore;

pub struct SiteConfigService {
    site_configs: Arc<SiteConfigStore>,
}

impl SiteConfigService {
    #[must_use]
    pub fn new(site_configs: Arc<SiteConfigStore>) -> Self {
        Self { site_configs }
    }

    /// The bound tenant's configuration.
    ///
    /// # Errors
    ///
    /// [`Error::TenantContextMissing`] with no bound tenant;
    /// [`Error::SiteConfigNotFound`] if the tenant has none.
    pub fn get(&self, ctx: &TenantContext) -> Result<SiteConfig, Error> {
        self.site_configs.get(ctx)
    }

    /// Applies a partial update to the bound tenant's configuration.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn update(
        &self,
        ctx: &TenantContext,
        update: SiteConfigUpdate,
    ) -> Result<SiteConfig, Error> {
        let now = Utc::now();
        self.site_configs
            .update(ctx, move |config| config.apply(update, now))
    }
}
