// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Opaque identifiers.
//!
//! Hosts usually hand the engine their own database keys; identifiers are
//! UUIDs so that they can be minted randomly (`new`) or derived from a stable
//! name (`from_name`, UUIDv5) when replaying fixtures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for name-derived identifiers.
const ID_NAMESPACE: Uuid = Uuid::from_u128(0x6d1c_07a4_52c1_4a57_9c9e_1f0b_3c0e_2a11);

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Deterministic identifier for a human-readable name.
            pub fn from_name(name: &str) -> Self {
                Self(Uuid::new_v5(&ID_NAMESPACE, format!("{}:{}", $kind, name).as_bytes()))
            }

            pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// A registered platform user.
    UserId, "user"
);
define_id!(
    /// A participatory space (process, assembly, ...) that owns components and roles.
    ParticipatorySpaceId, "space"
);
define_id!(
    /// A component (feature instance) inside a participatory space.
    ComponentId, "component"
);
define_id!(OpinionId, "opinion");
define_id!(CollaborativeDraftId, "collaborative_draft");
define_id!(
    /// A valuator role record, scoped to one participatory space.
    ValuatorRoleId, "valuator_role"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_derived_ids_are_stable_and_kind_scoped() {
        assert_eq!(UserId::from_name("alice"), UserId::from_name("alice"));
        assert_ne!(UserId::from_name("alice"), UserId::from_name("bob"));
        assert_ne!(UserId::from_name("alice").0, OpinionId::from_name("alice").0);
    }

    #[test]
    fn test_from_string() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()).unwrap(), id);
        assert!(UserId::from_string("not-a-uuid").is_err());
    }
}
