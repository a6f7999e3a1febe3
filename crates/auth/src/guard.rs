//! Pure authorization decisions.
//!
//! - No IO
//! - No panics
//! - No business logic (policy check only)

use thiserror::Error;

use crate::Identity;
use crate::permissions::{self, Permission};
use crate::roles::Role;

/// Why a check denied.
///
/// The reasons stay distinguishable for logging. At the HTTP boundary
/// `NoIdentity` maps to 401 and the other two map to one indistinguishable
/// 403, so responses cannot be used to probe which privilege a route wants.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum Denial {
    #[error("no authenticated identity")]
    NoIdentity,

    #[error("insufficient role")]
    InsufficientRole,

    #[error("missing permission")]
    MissingPermission,
}

/// Allow iff an identity is present and its role ranks at or above `min`.
///
/// Pure and idempotent: same inputs, same answer. An identity with an
/// unknown role ranks 0 and is denied, never a crash.
pub fn require_role(identity: Option<&Identity>, min: &Role) -> Result<(), Denial> {
    let identity = identity.ok_or(Denial::NoIdentity)?;
    if identity.role.is_at_least(min) {
        Ok(())
    } else {
        Err(Denial::InsufficientRole)
    }
}

/// Allow iff an identity is present and its role grants `permission`.
pub fn require_permission(
    identity: Option<&Identity>,
    permission: &Permission,
) -> Result<(), Denial> {
    let identity = identity.ok_or(Denial::NoIdentity)?;
    if permissions::has_permission(&identity.role, permission) {
        Ok(())
    } else {
        Err(Denial::MissingPermission)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use matreq_core::UserId;

    use super::*;
    use crate::roles;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: UserId::new(),
            email: "someone@example.com".to_string(),
            display_name: "Someone".to_string(),
            role,
        }
    }

    #[test]
    fn no_identity_always_denies_with_no_identity() {
        for min in &roles::KNOWN_ROLES {
            assert_eq!(require_role(None, min), Err(Denial::NoIdentity));
        }
        assert_eq!(
            require_permission(None, &permissions::VIEW_MATERIALS),
            Err(Denial::NoIdentity)
        );
    }

    #[test]
    fn admin_clears_a_manager_gate() {
        let admin = identity(roles::ADMIN);
        assert_eq!(require_role(Some(&admin), &roles::MANAGER), Ok(()));
    }

    #[test]
    fn user_is_denied_a_manager_gate_for_insufficient_role() {
        let user = identity(roles::USER);
        assert_eq!(
            require_role(Some(&user), &roles::MANAGER),
            Err(Denial::InsufficientRole)
        );
    }

    #[test]
    fn unknown_role_is_denied_every_real_gate() {
        let rogue = identity(Role::new("SUPERUSER"));
        for min in &roles::KNOWN_ROLES {
            assert_eq!(
                require_role(Some(&rogue), min),
                Err(Denial::InsufficientRole)
            );
        }
        assert_eq!(
            require_permission(Some(&rogue), &permissions::VIEW_MATERIALS),
            Err(Denial::MissingPermission)
        );
    }

    #[test]
    fn permission_checks_follow_the_table() {
        let staff = identity(roles::STAFF);
        assert_eq!(
            require_permission(Some(&staff), &permissions::MANAGE_MATERIALS),
            Ok(())
        );
        assert_eq!(
            require_permission(Some(&staff), &permissions::APPROVE_REQUESTS),
            Err(Denial::MissingPermission)
        );
    }

    #[test]
    fn decisions_are_idempotent() {
        let manager = identity(roles::MANAGER);
        let first = require_permission(Some(&manager), &permissions::APPROVE_REQUESTS);
        let second = require_permission(Some(&manager), &permissions::APPROVE_REQUESTS);
        assert_eq!(first, second);

        let first = require_role(Some(&manager), &roles::ADMIN);
        let second = require_role(Some(&manager), &roles::ADMIN);
        assert_eq!(first, second);
    }
}
