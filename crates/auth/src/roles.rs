use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles are opaque strings at the type level so that values read from
/// tokens or the user store stay representable even when they are not one
/// of the known tiers. Anything outside the known set ranks 0 and fails
/// every privilege check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

/// Basic authenticated account.
pub const USER: Role = Role::from_static("USER");

/// Warehouse/operations staff; maintains the material catalog.
pub const STAFF: Role = Role::from_static("STAFF");

/// Line manager; reviews and approves material requests.
pub const MANAGER: Role = Role::from_static("MANAGER");

/// Full administrator.
pub const ADMIN: Role = Role::from_static("ADMIN");

/// All known roles, lowest rank first.
pub const KNOWN_ROLES: [Role; 4] = [USER, STAFF, MANAGER, ADMIN];

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hierarchy rank of this role (USER=1 .. ADMIN=4, unknown 0).
    pub fn rank(&self) -> u8 {
        rank_of(self.as_str())
    }

    /// Whether this role sits at or above `min` in the hierarchy.
    pub fn is_at_least(&self, min: &Role) -> bool {
        self.rank() >= min.rank()
    }

    /// Whether this is one of the four known tiers.
    pub fn is_known(&self) -> bool {
        self.rank() > 0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hierarchy rank of a wire-level role string.
///
/// Pure and total: every input maps to an integer, strings outside the
/// known set map to 0.
pub fn rank_of(role: &str) -> u8 {
    match role {
        "USER" => 1,
        "STAFF" => 2,
        "MANAGER" => 3,
        "ADMIN" => 4,
        _ => 0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn any_role() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(USER),
            Just(STAFF),
            Just(MANAGER),
            Just(ADMIN),
            "[A-Z_]{1,16}".prop_map(Role::new),
        ]
    }

    #[test]
    fn ranks_follow_declared_order() {
        assert_eq!(rank_of("USER"), 1);
        assert_eq!(rank_of("STAFF"), 2);
        assert_eq!(rank_of("MANAGER"), 3);
        assert_eq!(rank_of("ADMIN"), 4);

        for pair in KNOWN_ROLES.windows(2) {
            assert!(pair[1].rank() > pair[0].rank());
        }
    }

    #[test]
    fn unknown_role_ranks_zero() {
        assert_eq!(rank_of("SUPERUSER"), 0);
        assert_eq!(rank_of(""), 0);
        assert_eq!(rank_of("admin"), 0);

        let rogue = Role::new("SUPERUSER");
        for known in &KNOWN_ROLES {
            assert!(!rogue.is_at_least(known));
        }
    }

    #[test]
    fn hierarchy_is_reflexive() {
        for role in &KNOWN_ROLES {
            assert!(role.is_at_least(role));
        }
    }

    #[test]
    fn antisymmetric_on_distinct_known_roles() {
        for a in &KNOWN_ROLES {
            for b in &KNOWN_ROLES {
                if a != b {
                    assert!(!(a.is_at_least(b) && b.is_at_least(a)));
                }
            }
        }
    }

    proptest! {
        #[test]
        fn rank_is_total_and_never_panics(s in "\\PC*") {
            prop_assert!(rank_of(&s) <= 4);
        }

        #[test]
        fn hierarchy_is_transitive(a in any_role(), b in any_role(), c in any_role()) {
            if a.is_at_least(&b) && b.is_at_least(&c) {
                prop_assert!(a.is_at_least(&c));
            }
        }

        #[test]
        fn comparison_is_consistent_with_rank(a in any_role(), b in any_role()) {
            prop_assert_eq!(a.is_at_least(&b), a.rank() >= b.rank());
        }
    }
}
