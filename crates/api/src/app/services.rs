//! Application service wiring (stores shared across handlers).

use std::sync::Arc;

use crate::stores::{InMemoryUserStore, MaterialStore, RequestStore, SessionStore};

pub struct AppServices {
    pub users: Arc<InMemoryUserStore>,
    pub sessions: Arc<SessionStore>,
    pub materials: MaterialStore,
    pub requests: RequestStore,
}

impl AppServices {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            sessions: Arc::new(SessionStore::new()),
            materials: MaterialStore::new(),
            requests: RequestStore::new(),
        }
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}
