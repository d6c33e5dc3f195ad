//! Axum extractors over the request's `TenantContext`.
//!
//! Handlers obtain tenant identity exclusively through these; nothing
//! downstream reads the host header or token again.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use autolot_core::{AdminPrincipal, Error, TenantContext};

use crate::error::ApiError;

/// Extracts the request's tenant context, bound or not.
///
/// Rejects with the fail-closed configuration error if no context is
/// present at all -- that means the gates did not run, which is a wiring
/// bug, not a client condition.
pub struct RequestTenant(pub TenantContext);

impl<S: Send + Sync> FromRequestParts<S> for RequestTenant {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .map(Self)
            .ok_or(ApiError(Error::TenantContextMissing))
    }
}

/// Requires an authenticated admin; rejects with 401 otherwise.
pub struct RequireAdmin(pub AdminPrincipal);

impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .and_then(|ctx| ctx.principal().cloned())
            .map(Self)
            .ok_or(ApiError(Error::Unauthenticated))
    }
}
