//! Authentication configuration.

use autolot_core::Error;

/// HS256 needs a key at least as long as the hash output; anything
/// shorter weakens the MAC and is refused at startup.
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration for token issuance and validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric signing secret. Must be at least [`MIN_SECRET_BYTES`].
    pub jwt_secret: String,
    /// Token lifetime in milliseconds (default: 86_400_000 = 24 hours).
    pub token_ttl_ms: u64,
}

impl AuthConfig {
    /// Fails fast on a secret too short for HS256 or a zero TTL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(Error::Validation {
                field: "jwt_secret",
                message: format!("must be at least {MIN_SECRET_BYTES} bytes for HMAC-SHA-256"),
            });
        }
        if self.token_ttl_ms == 0 {
            return Err(Error::Validation {
                field: "token_ttl_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_ms: 86_400_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation() {
        // An unset secret must never slip through to a running server.
        assert!(AuthConfig::default().validate().is_err());
    }

    #[test]
    fn short_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: "too-short".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn boundary_secret_accepted() {
        let config = AuthConfig {
            jwt_secret: "x".repeat(MIN_SECRET_BYTES),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_ttl_rejected() {
        let config = AuthConfig {
            jwt_secret: "x".repeat(MIN_SECRET_BYTES),
            token_ttl_ms: 0,
        };
        assert!(config.validate().is_err());
    }
}
