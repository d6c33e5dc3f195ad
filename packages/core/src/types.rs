use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parses an identifier from its canonical string form.
            ///
            /// Returns `None` if the input is not a valid UUID.
            #[must_use]
            pub fn parse(s: &str) -> Option<Self> {
                Uuid::parse_str(s).ok().map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type! {
    /// Identifier of a dealership (tenant). The unit of data partitioning:
    /// every tenant-owned row carries one of these.
    DealershipId
}

id_type! {
    /// Identifier of an admin user within a dealership.
    AdminUserId
}

id_type! {
    /// Identifier of a vehicle listing.
    VehicleId
}

id_type! {
    /// Identifier of a site configuration record.
    SiteConfigId
}

/// Role of an admin user. Closed set: the dealership creator is the
/// `Owner`; additional staff accounts are `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    Owner,
    Admin,
}

impl AdminRole {
    /// Wire/storage name of the role, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parses a role from its wire name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OWNER" => Some(Self::Owner),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity established by the token gate.
///
/// Downstream authorization checks read this from the
/// [`TenantContext`](crate::context::TenantContext); its presence is what
/// distinguishes an authenticated request from an anonymous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPrincipal {
    /// The admin user this request acts as.
    pub admin_user_id: AdminUserId,
    /// Email carried in the token, for audit logging.
    pub email: String,
    /// Role granted to the admin user.
    pub role: AdminRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_and_parse_round_trip() {
        let id = DealershipId::new();
        let parsed = DealershipId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_parse_rejects_garbage() {
        assert!(VehicleId::parse("not-a-uuid").is_none());
        assert!(AdminUserId::parse("").is_none());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(DealershipId::new(), DealershipId::new());
    }

    #[test]
    fn role_round_trips_through_wire_name() {
        for role in [AdminRole::Owner, AdminRole::Admin] {
            assert_eq!(AdminRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn role_parse_rejects_unknown() {
        assert!(AdminRole::parse("SUPERUSER").is_none());
        assert!(AdminRole::parse("owner").is_none());
    }

    #[test]
    fn role_serializes_screaming_snake() {
        let json = serde_json::to_string(&AdminRole::Owner).unwrap();
        assert_eq!(json, "\"OWNER\"");
    }
}
