//! Tenant resolution: the two request gates and the context extractors.
//!
//! Gate order is load-bearing and set where the router composes its
//! layers: the subdomain gate runs first and either binds a tenant, lets
//! the request through unbound, or ends it with a not-found; the token
//! gate then overrides or establishes the binding from a verified token.

pub mod extract;
pub mod gates;

pub use extract::{RequestTenant, RequireAdmin};
pub use gates::{subdomain_gate, token_gate};
