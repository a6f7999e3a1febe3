//! Active session registry.
//!
//! A signed token is only honored while its session id is present here.
//! Logout removes the record, which invalidates the token immediately even
//! though its signature and expiry are still good.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use matreq_core::SessionId;

#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<SessionId, DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, sid: SessionId, expires_at: DateTime<Utc>) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(sid, expires_at);
    }

    pub fn contains(&self, sid: SessionId) -> bool {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .contains_key(&sid)
    }

    pub fn remove(&self, sid: SessionId) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(&sid);
    }

    /// Drop records whose expiry has passed. Expired tokens are already
    /// rejected by claims validation; this keeps the registry from growing
    /// without bound.
    pub fn purge_expired(&self, now: DateTime<Utc>) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .retain(|_, expires_at| *expires_at > now);
    }
}
