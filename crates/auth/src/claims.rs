use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use matreq_core::{SessionId, UserId};

use crate::Role;

/// Session token claims (transport-agnostic).
///
/// This is the payload a signed session token carries once it has been
/// decoded and signature-checked by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user the session belongs to.
    pub sub: UserId,

    /// Server-side session record id; the record is destroyed on logout.
    pub sid: SessionId,

    /// Role at issue time. Informational only: the resolver re-reads the
    /// account's current role on every request.
    pub role: Role,

    /// Issued-at timestamp.
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    /// Malformed payload or bad signature. Carries no further detail: at
    /// the HTTP boundary every failure must read the same as a missing
    /// token.
    #[error("token is invalid")]
    Invalid,
}

/// Deterministically validate the claims time window.
///
/// Note: this validates the *claims* only. Signature verification and
/// decoding belong to the codec.
pub fn validate_claims(
    claims: &SessionClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::roles;

    fn claims(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            sub: UserId::new(),
            sid: SessionId::new(),
            role: roles::USER,
            issued_at,
            expires_at,
        }
    }

    #[test]
    fn accepts_a_live_window() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(5), now + Duration::minutes(5));
        assert_eq!(validate_claims(&c, now), Ok(()));
    }

    #[test]
    fn rejects_expired_claims() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(60), now - Duration::minutes(30));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::Expired));
    }

    #[test]
    fn rejects_claims_from_the_future() {
        let now = Utc::now();
        let c = claims(now + Duration::minutes(5), now + Duration::minutes(30));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn rejects_an_inverted_window() {
        let now = Utc::now();
        let c = claims(now, now - Duration::minutes(1));
        assert_eq!(
            validate_claims(&c, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
