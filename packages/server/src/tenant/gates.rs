//! The two request gates.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::header::{AUTHORIZATION, HOST};
use tracing::debug;

use autolot_core::slug::host_candidate;
use autolot_core::{AdminPrincipal, Error, Slug, TenantContext};

use crate::error::ApiError;
use crate::network::handlers::AppState;

/// Gate 1: resolves the tenant from the `Host` header.
///
/// Every request leaves this gate with a `TenantContext` in its
/// extensions -- bound when the host names a known dealership subdomain,
/// unbound for bare-domain and `www` hosts. An unknown subdomain ends the
/// request here with a not-found; the handler never runs.
///
/// # Errors
///
/// [`Error::TenantNotFound`] when the host carries a subdomain slug no
/// dealership owns.
pub async fn subdomain_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let mut ctx = TenantContext::new();

    let host = request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok());

    if let Some(candidate) = host.and_then(host_candidate) {
        let found = Slug::parse(&candidate)
            .ok()
            .and_then(|slug| state.dealerships.find_by_slug(&slug));
        match found {
            Some(dealership) => {
                debug!(slug = %candidate, tenant = %dealership.id, "tenant resolved from subdomain");
                ctx.bind_tenant(dealership.id);
            }
            None => return Err(ApiError(Error::TenantNotFound { slug: candidate })),
        }
    }

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}

/// Gate 2: establishes identity from a bearer token.
///
/// Soft everywhere: a missing header, a non-Bearer scheme, or an invalid
/// token all pass through unauthenticated, leaving the authorization
/// decision to the route (public routes must stay reachable). A valid
/// token binds its `dealershipId` into the context -- overriding any
/// subdomain-derived binding, since the token is cryptographically
/// verified and the subdomain lookup is not -- and installs the principal.
pub async fn token_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(request).await;
    };

    if !state.tokens.validate(&token) {
        // Subtype already logged by the validator; the request simply
        // continues without an identity.
        return next.run(request).await;
    }

    if let Some(claims) = state.tokens.extract_claims(&token) {
        let mut ctx = request
            .extensions_mut()
            .remove::<TenantContext>()
            .unwrap_or_default();

        if !ctx.is_authenticated() {
            debug!(tenant = %claims.dealership_id, subject = %claims.sub, "request authenticated from token");
            ctx.bind_tenant(claims.dealership_id);
            ctx.authenticate(AdminPrincipal {
                admin_user_id: claims.sub,
                email: claims.email,
                role: claims.role,
            });
        }

        request.extensions_mut().insert(ctx);
    }

    next.run(request).await
}
