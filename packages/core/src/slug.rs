//! Tenant slug type and subdomain resolution.
//!
//! A slug is the URL-safe lowercase identifier a dealership is addressed
//! by: `acme` in `acme.autolot.com`. [`Slug::from_host`] implements the
//! host-header half of tenant resolution; the directory lookup half lives
//! in the server crate's subdomain gate.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z0-9-]+$").expect("slug pattern is valid"));

/// Lowercase URL-safe tenant identifier (`^[a-z0-9-]+$`).
///
/// Construction normalizes to lowercase, so two `Slug` values compare
/// equal iff they address the same tenant regardless of input casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Normalizes and validates a candidate slug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the lowercased input does not
    /// match `^[a-z0-9-]+$`.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let normalized = raw.to_lowercase();
        if SLUG_PATTERN.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(Error::Validation {
                field: "slug",
                message: "must contain only lowercase letters, digits, and hyphens".to_string(),
            })
        }
    }

    /// Derives the candidate tenant slug from an HTTP `Host` header.
    ///
    /// Convenience over [`host_candidate`]: additionally requires the
    /// candidate to be a syntactically valid slug. The result is not yet
    /// known to name an existing tenant; that lookup is the caller's job.
    #[must_use]
    pub fn from_host(host: &str) -> Option<Self> {
        host_candidate(host).and_then(|label| Self::parse(&label).ok())
    }

    /// The slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts the raw subdomain label a host addresses, if any.
///
/// Strips any `:port` suffix, lowercases, and splits on `.`. Hosts with
/// fewer than three labels (`localhost`, `autolot.com`) and hosts whose
/// first label is `www` carry no tenant subdomain and yield `None`;
/// otherwise the first label is the candidate, returned verbatim even
/// when it is not a well-formed slug -- no well-formed slug can match it,
/// so resolution treats it like any other unknown tenant.
#[must_use]
pub fn host_candidate(host: &str) -> Option<String> {
    let clean = host.split(':').next().unwrap_or("").to_lowercase();
    let labels: Vec<&str> = clean.split('.').collect();

    if labels.len() < 3 || labels[0] == "www" {
        return None;
    }

    Some(labels[0].to_string())
}
