//! Top-level server configuration.

use autolot_core::Error;

use crate::auth::AuthConfig;
use crate::network::NetworkConfig;

/// Everything the server needs to start.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Validates the parts that must fail fast at startup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] from the auth configuration (weak
    /// signing secret, zero TTL).
    pub fn validate(&self) -> Result<(), Error> {
        self.auth.validate()
    }
}
