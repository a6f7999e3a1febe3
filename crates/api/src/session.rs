//! Session issuance (the login side of the session lifecycle).

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use matreq_auth::{Hs256SessionCodec, SessionClaims, TokenValidationError};
use matreq_core::SessionId;

use crate::stores::UserRecord;

/// Mints signed session tokens for freshly authenticated users.
#[derive(Clone)]
pub struct SessionIssuer {
    pub codec: Arc<Hs256SessionCodec>,
    pub ttl: Duration,
}

impl SessionIssuer {
    /// Build and sign claims for a new session.
    ///
    /// The caller records `claims.sid` in the session store; a token whose
    /// sid is no longer stored does not resolve.
    pub fn issue(
        &self,
        user: &UserRecord,
        now: DateTime<Utc>,
    ) -> Result<(SessionClaims, String), TokenValidationError> {
        let claims = SessionClaims {
            sub: user.id,
            sid: SessionId::new(),
            role: user.role.clone(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        let token = self.codec.encode(&claims)?;
        Ok((claims, token))
    }
}
