//! Domain error taxonomy.
//!
//! Every fallible domain operation returns one of these variants so call
//! sites handle failure explicitly instead of catching exceptions. Two
//! deliberate shapes:
//!
//! - Cross-tenant access reuses the plain not-found variants. A caller
//!   probing another tenant's resource ids learns nothing beyond "no such
//!   resource".
//! - [`Error::TenantContextMissing`] is a server-side configuration
//!   fault (a tenant-scoped operation ran with no bound tenant). It maps
//!   to a generic 500 and never to data.

use thiserror::Error;

/// Domain-level failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The host header named a subdomain no dealership owns. Terminates
    /// the request pipeline before any handler runs. Carries the raw
    /// candidate label, which need not be a well-formed slug.
    #[error("dealership not found for subdomain '{slug}'")]
    TenantNotFound { slug: String },

    /// A tenant-scoped operation executed with no tenant bound. Always a
    /// wiring bug, never a user error; data access fails closed rather
    /// than returning unscoped rows.
    #[error("no tenant bound to the request context")]
    TenantContextMissing,

    #[error("dealership not found")]
    DealershipNotFound,

    /// Also returned when the vehicle exists but belongs to another
    /// tenant.
    #[error("vehicle not found")]
    VehicleNotFound,

    #[error("site configuration not found")]
    SiteConfigNotFound,

    #[error("admin user not found")]
    AdminUserNotFound,

    /// Uniqueness violation (email already registered, slug taken).
    #[error("{message}")]
    Conflict { message: String },

    /// Login failure. One message for unknown email and wrong password so
    /// the response does not reveal which accounts exist.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An admin route was reached without an authenticated principal.
    #[error("authentication required")]
    Unauthenticated,

    /// A request field failed structural validation.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Internal error from any displayable cause.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::Internal {
            message: cause.to_string(),
        }
    }

    /// Conflict with a caller-facing message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_not_found_names_the_slug() {
        let err = Error::TenantNotFound {
            slug: "nosuchslug".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "dealership not found for subdomain 'nosuchslug'"
        );
    }

    #[test]
    fn cross_tenant_reads_as_plain_not_found() {
        // Cross-tenant access constructs this same variant; the message
        // gives a probing caller nothing beyond "no such resource".
        assert_eq!(Error::VehicleNotFound.to_string(), "vehicle not found");
    }

    #[test]
    fn invalid_credentials_is_uniform() {
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "invalid email or password"
        );
    }
}
