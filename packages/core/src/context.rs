//! Request-scoped tenant context.
//!
//! One `TenantContext` is constructed per inbound request by the subdomain
//! gate and carried in that request's extension map. It is the *only*
//! place the active tenant identity lives: business logic and data access
//! read it through [`TenantContext::tenant_id`] and never from request
//! parameters, headers, or globals.
//!
//! Isolation is structural rather than procedural. There is no
//! thread-local or process-wide cell that pooled runtime workers could
//! leak through: each context is owned by exactly one request and is
//! dropped with it, on success and error paths alike. Two requests served
//! concurrently by the same worker pool therefore cannot observe each
//! other's binding.

use crate::types::{AdminPrincipal, DealershipId};

/// Per-request carrier of the active tenant binding and, once the token
/// gate has run, the authenticated principal.
#[derive(Debug, Clone, Default)]
pub struct TenantContext {
    tenant_id: Option<DealershipId>,
    principal: Option<AdminPrincipal>,
}

impl TenantContext {
    /// Creates an unbound context: no tenant, no principal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the active tenant, replacing any previous binding.
    ///
    /// The subdomain gate calls this with the tenant resolved from the
    /// host header; the token gate calls it again with the tenant from a
    /// verified token, which takes precedence because it is
    /// cryptographically authenticated while the subdomain lookup is not.
    pub fn bind_tenant(&mut self, tenant_id: DealershipId) {
        self.tenant_id = Some(tenant_id);
    }

    /// The active tenant, or `None` when the request reached no gate that
    /// could establish one (bare domain, `www`, no token).
    #[must_use]
    pub fn tenant_id(&self) -> Option<DealershipId> {
        self.tenant_id
    }

    /// Installs the authenticated identity extracted from a valid token.
    pub fn authenticate(&mut self, principal: AdminPrincipal) {
        self.principal = Some(principal);
    }

    /// The authenticated identity, if the request presented a valid token.
    #[must_use]
    pub fn principal(&self) -> Option<&AdminPrincipal> {
        self.principal.as_ref()
    }

    /// Whether a valid token authenticated this request.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Drops both the tenant binding and the principal, returning the
    /// context to its unbound state.
    pub fn clear(&mut self) {
        self.tenant_id = None;
        self.principal = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AdminRole, AdminUserId};

    fn principal() -> AdminPrincipal {
        AdminPrincipal {
            admin_user_id: AdminUserId::new(),
            email: "owner@acme.test".to_string(),
            role: AdminRole::Owner,
        }
    }

    #[test]
    fn starts_unbound() {
        let ctx = TenantContext::new();
        assert_eq!(ctx.tenant_id(), None);
        assert!(ctx.principal().is_none());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn bind_then_get() {
        let id = DealershipId::new();
        let mut ctx = TenantContext::new();
        ctx.bind_tenant(id);
        assert_eq!(ctx.tenant_id(), Some(id));
    }

    #[test]
    fn rebind_overrides_previous_binding() {
        let subdomain_tenant = DealershipId::new();
        let token_tenant = DealershipId::new();

        let mut ctx = TenantContext::new();
        ctx.bind_tenant(subdomain_tenant);
        ctx.bind_tenant(token_tenant);

        assert_eq!(ctx.tenant_id(), Some(token_tenant));
    }

    #[test]
    fn authenticate_sets_principal() {
        let mut ctx = TenantContext::new();
        ctx.authenticate(principal());
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.principal().unwrap().role, AdminRole::Owner);
    }

    #[test]
    fn clear_resets_everything() {
        let mut ctx = TenantContext::new();
        ctx.bind_tenant(DealershipId::new());
        ctx.authenticate(principal());

        ctx.clear();

        assert_eq!(ctx.tenant_id(), None);
        assert!(ctx.principal().is_none());
    }
}
