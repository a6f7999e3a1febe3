//! User accounts, behind the `UserStore` seam.

use std::collections::HashMap;
use std::sync::RwLock;

use matreq_auth::Role;
use matreq_core::{DomainError, UserId};

use crate::password;

/// Stored user account.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub password_hash: String,
}

/// Read side of the user store, as consumed by the session resolver.
///
/// The resolver re-reads the account on every request, so a role change
/// takes effect on the target's next request rather than retroactively on
/// identities that were already resolved.
pub trait UserStore: Send + Sync {
    fn find_by_id(&self, id: UserId) -> Option<UserRecord>;
    fn find_by_email(&self, email: &str) -> Option<UserRecord>;
}

#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account. Email is normalized (trimmed, lowercased) and
    /// must be unique.
    pub fn create(
        &self,
        email: &str,
        display_name: &str,
        role: Role,
        password: &str,
    ) -> Result<UserRecord, DomainError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(DomainError::validation("display name cannot be empty"));
        }

        let password_hash = password::hash_password(password)
            .map_err(|_| DomainError::validation("unusable password"))?;

        let mut inner = self.inner.write().expect("user store lock poisoned");
        if inner.values().any(|u| u.email == email) {
            return Err(DomainError::conflict("email already registered"));
        }

        let record = UserRecord {
            id: UserId::new(),
            email,
            display_name: display_name.to_string(),
            role,
            password_hash,
        };
        inner.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn set_role(&self, id: UserId, role: Role) -> Result<UserRecord, DomainError> {
        let mut inner = self.inner.write().expect("user store lock poisoned");
        let record = inner.get_mut(&id).ok_or(DomainError::NotFound)?;
        record.role = role;
        Ok(record.clone())
    }

    pub fn list(&self) -> Vec<UserRecord> {
        let mut all: Vec<_> = self
            .inner
            .read()
            .expect("user store lock poisoned")
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| a.email.cmp(&b.email));
        all
    }

    /// Check credentials. Unknown email and wrong password produce the
    /// same `None`.
    pub fn verify_login(&self, email: &str, password: &str) -> Option<UserRecord> {
        let user = self.find_by_email(email)?;
        password::verify_password(password, &user.password_hash).then_some(user)
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_id(&self, id: UserId) -> Option<UserRecord> {
        self.inner
            .read()
            .expect("user store lock poisoned")
            .get(&id)
            .cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        let normalized = email.trim().to_lowercase();
        self.inner
            .read()
            .expect("user store lock poisoned")
            .values()
            .find(|u| u.email == normalized)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use matreq_auth::roles;

    use super::*;

    #[test]
    fn create_normalizes_email_and_rejects_duplicates() {
        let store = InMemoryUserStore::new();
        let user = store
            .create("  Alice@Example.COM ", "Alice", roles::USER, "pw")
            .unwrap();
        assert_eq!(user.email, "alice@example.com");

        let err = store
            .create("alice@example.com", "Alice Again", roles::USER, "pw")
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn create_rejects_malformed_input() {
        let store = InMemoryUserStore::new();
        assert!(store.create("no-at-sign", "Bob", roles::USER, "pw").is_err());
        assert!(store.create("bob@example.com", "  ", roles::USER, "pw").is_err());
    }

    #[test]
    fn verify_login_collapses_failure_modes() {
        let store = InMemoryUserStore::new();
        store
            .create("carol@example.com", "Carol", roles::STAFF, "secret")
            .unwrap();

        assert!(store.verify_login("carol@example.com", "secret").is_some());
        assert!(store.verify_login("carol@example.com", "wrong").is_none());
        assert!(store.verify_login("nobody@example.com", "secret").is_none());
    }

    #[test]
    fn set_role_updates_the_stored_record() {
        let store = InMemoryUserStore::new();
        let user = store
            .create("dave@example.com", "Dave", roles::USER, "pw")
            .unwrap();

        store.set_role(user.id, roles::MANAGER).unwrap();
        assert_eq!(store.find_by_id(user.id).unwrap().role, roles::MANAGER);

        assert!(matches!(
            store.set_role(UserId::new(), roles::USER),
            Err(DomainError::NotFound)
        ));
    }
}
