use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Permission identifier.
///
/// Permissions are opaque capability tokens (e.g. "APPROVE_REQUESTS") with
/// no internal structure; the role→permission table below is their only
/// source of meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const VIEW_MATERIALS: Permission = Permission::from_static("VIEW_MATERIALS");
pub const CREATE_REQUESTS: Permission = Permission::from_static("CREATE_REQUESTS");
pub const VIEW_OWN_REQUESTS: Permission = Permission::from_static("VIEW_OWN_REQUESTS");
pub const MANAGE_MATERIALS: Permission = Permission::from_static("MANAGE_MATERIALS");
pub const VIEW_REPORTS: Permission = Permission::from_static("VIEW_REPORTS");
pub const VIEW_ALL_REQUESTS: Permission = Permission::from_static("VIEW_ALL_REQUESTS");
pub const APPROVE_REQUESTS: Permission = Permission::from_static("APPROVE_REQUESTS");
pub const EXPORT_DATA: Permission = Permission::from_static("EXPORT_DATA");
pub const MANAGE_USERS: Permission = Permission::from_static("MANAGE_USERS");
pub const SYSTEM_SETTINGS: Permission = Permission::from_static("SYSTEM_SETTINGS");

// Grants per role. Each tier spells out the tier below it so the superset
// chain is explicit rather than derived from rank; MANAGE_USERS and
// SYSTEM_SETTINGS are ADMIN-only and never implied by rank.
const USER_GRANTS: &[Permission] = &[VIEW_MATERIALS, CREATE_REQUESTS, VIEW_OWN_REQUESTS];

const STAFF_GRANTS: &[Permission] = &[
    VIEW_MATERIALS,
    CREATE_REQUESTS,
    VIEW_OWN_REQUESTS,
    MANAGE_MATERIALS,
    VIEW_REPORTS,
];

const MANAGER_GRANTS: &[Permission] = &[
    VIEW_MATERIALS,
    CREATE_REQUESTS,
    VIEW_OWN_REQUESTS,
    MANAGE_MATERIALS,
    VIEW_REPORTS,
    VIEW_ALL_REQUESTS,
    APPROVE_REQUESTS,
    EXPORT_DATA,
];

const ADMIN_GRANTS: &[Permission] = &[
    VIEW_MATERIALS,
    CREATE_REQUESTS,
    VIEW_OWN_REQUESTS,
    MANAGE_MATERIALS,
    VIEW_REPORTS,
    VIEW_ALL_REQUESTS,
    APPROVE_REQUESTS,
    EXPORT_DATA,
    MANAGE_USERS,
    SYSTEM_SETTINGS,
];

/// Permissions granted to a role.
///
/// Process-wide constant table: fixed at startup, never written afterwards,
/// safe for any number of concurrent readers. Unknown roles get the empty
/// set.
pub fn permissions_of(role: &Role) -> &'static [Permission] {
    match role.as_str() {
        "USER" => USER_GRANTS,
        "STAFF" => STAFF_GRANTS,
        "MANAGER" => MANAGER_GRANTS,
        "ADMIN" => ADMIN_GRANTS,
        _ => &[],
    }
}

/// Whether `role` grants `permission`.
pub fn has_permission(role: &Role, permission: &Permission) -> bool {
    permissions_of(role).iter().any(|granted| granted == permission)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{self, KNOWN_ROLES};

    #[test]
    fn each_tier_is_a_superset_of_the_one_below() {
        for pair in KNOWN_ROLES.windows(2) {
            let (lower, higher) = (&pair[0], &pair[1]);
            for perm in permissions_of(lower) {
                assert!(
                    has_permission(higher, perm),
                    "{higher} is missing {perm} granted to {lower}"
                );
            }
            assert!(permissions_of(higher).len() > permissions_of(lower).len());
        }
    }

    #[test]
    fn admin_only_permissions_are_not_implied_by_rank() {
        for role in [roles::USER, roles::STAFF, roles::MANAGER] {
            assert!(!has_permission(&role, &MANAGE_USERS));
            assert!(!has_permission(&role, &SYSTEM_SETTINGS));
        }
        assert!(has_permission(&roles::ADMIN, &MANAGE_USERS));
        assert!(has_permission(&roles::ADMIN, &SYSTEM_SETTINGS));
    }

    #[test]
    fn unknown_role_has_no_permissions() {
        let rogue = Role::new("SUPERUSER");
        assert!(permissions_of(&rogue).is_empty());
        assert!(!has_permission(&rogue, &VIEW_MATERIALS));
    }

    #[test]
    fn membership_matches_the_table() {
        assert!(has_permission(&roles::USER, &CREATE_REQUESTS));
        assert!(!has_permission(&roles::USER, &MANAGE_MATERIALS));
        assert!(has_permission(&roles::STAFF, &MANAGE_MATERIALS));
        assert!(!has_permission(&roles::STAFF, &APPROVE_REQUESTS));
        assert!(has_permission(&roles::MANAGER, &APPROVE_REQUESTS));
    }
}
