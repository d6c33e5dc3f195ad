//! Per-dealership site configuration.
//!
//! Storefront layout and theming, stored opaquely: the backend persists
//! and serves these values without interpreting them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DealershipId, SiteConfigId};

/// Site configuration for one dealership. Zero or one per tenant; a
/// default is created at signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub id: SiteConfigId,
    pub dealership_id: DealershipId,
    /// Opaque layout document, e.g. `{"sections": []}`.
    pub layout_json: serde_json::Value,
    pub theme: String,
    pub primary_color: String,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    pub custom_css: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SiteConfig {
    /// The configuration every dealership starts with at signup.
    #[must_use]
    pub fn default_for(dealership_id: DealershipId, now: DateTime<Utc>) -> Self {
        Self {
            id: SiteConfigId::new(),
            dealership_id,
            layout_json: serde_json::json!({ "sections": [] }),
            theme: "default".to_string(),
            primary_color: "#000000".to_string(),
            secondary_color: None,
            font_family: None,
            custom_css: None,
            updated_at: now,
        }
    }

    /// Applies a partial update. Absent fields keep their stored values.
    pub fn apply(&mut self, update: SiteConfigUpdate, now: DateTime<Utc>) {
        if let Some(layout_json) = update.layout_json {
            self.layout_json = layout_json;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(primary_color) = update.primary_color {
            self.primary_color = primary_color;
        }
        if update.secondary_color.is_some() {
            self.secondary_color = update.secondary_color;
        }
        if update.font_family.is_some() {
            self.font_family = update.font_family;
        }
        if update.custom_css.is_some() {
            self.custom_css = update.custom_css;
        }
        self.updated_at = now;
    }
}

/// Partial site-config update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfigUpdate {
    pub layout_json: Option<serde_json::Value>,
    pub theme: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    pub custom_css: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_signup_contract() {
        let config = SiteConfig::default_for(DealershipId::new(), Utc::now());
        assert_eq!(config.layout_json, serde_json::json!({ "sections": [] }));
        assert_eq!(config.theme, "default");
        assert_eq!(config.primary_color, "#000000");
        assert!(config.secondary_color.is_none());
    }

    #[test]
    fn apply_is_partial() {
        let mut config = SiteConfig::default_for(DealershipId::new(), Utc::now());
        config.apply(
            SiteConfigUpdate {
                theme: Some("midnight".into()),
                ..SiteConfigUpdate::default()
            },
            Utc::now(),
        );

        assert_eq!(config.theme, "midnight");
        // Untouched fields survive.
        assert_eq!(config.primary_color, "#000000");
    }
}
