use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};

/// Verifies an inbound session token into claims.
///
/// Trait seam so the HTTP layer can be exercised with handcrafted
/// verifiers in tests.
pub trait SessionVerifier: Send + Sync {
    fn verify(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, TokenValidationError>;
}

/// HS256 session token codec.
pub struct Hs256SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256SessionCodec {
    pub fn new(secret: &[u8]) -> Self {
        // Time-window checks happen in `validate_claims` with an explicit
        // `now`; jsonwebtoken's own expiry handling stays off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenValidationError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|_| TokenValidationError::Invalid)
    }
}

impl SessionVerifier for Hs256SessionCodec {
    fn verify(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, TokenValidationError> {
        let decoded =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
                .map_err(|_| TokenValidationError::Invalid)?;
        validate_claims(&decoded.claims, now)?;
        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use matreq_core::{SessionId, UserId};

    use super::*;
    use crate::roles;

    fn codec() -> Hs256SessionCodec {
        Hs256SessionCodec::new(b"test-secret")
    }

    fn claims(now: DateTime<Utc>, ttl: Duration) -> SessionClaims {
        SessionClaims {
            sub: UserId::new(),
            sid: SessionId::new(),
            role: roles::STAFF,
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    #[test]
    fn round_trips_claims() {
        let now = Utc::now();
        let claims = claims(now, Duration::minutes(10));

        let token = codec().encode(&claims).unwrap();
        let verified = codec().verify(&token, now).unwrap();

        assert_eq!(verified.sub, claims.sub);
        assert_eq!(verified.sid, claims.sid);
        assert_eq!(verified.role, claims.role);
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let now = Utc::now();
        let token = Hs256SessionCodec::new(b"other-secret")
            .encode(&claims(now, Duration::minutes(10)))
            .unwrap();

        assert_eq!(
            codec().verify(&token, now),
            Err(TokenValidationError::Invalid)
        );
    }

    #[test]
    fn rejects_a_tampered_token() {
        let now = Utc::now();
        let mut token = codec().encode(&claims(now, Duration::minutes(10))).unwrap();
        // Flip a payload character.
        let mid = token.len() / 2;
        let replacement = if token.as_bytes()[mid] == b'A' { "B" } else { "A" };
        token.replace_range(mid..mid + 1, replacement);

        assert_eq!(
            codec().verify(&token, now),
            Err(TokenValidationError::Invalid)
        );
    }

    #[test]
    fn rejects_garbage() {
        let now = Utc::now();
        assert_eq!(codec().verify("", now), Err(TokenValidationError::Invalid));
        assert_eq!(
            codec().verify("not-a-token", now),
            Err(TokenValidationError::Invalid)
        );
    }

    #[test]
    fn rejects_an_expired_token() {
        let now = Utc::now();
        let token = codec()
            .encode(&claims(now - Duration::minutes(30), Duration::minutes(10)))
            .unwrap();

        assert_eq!(
            codec().verify(&token, now),
            Err(TokenValidationError::Expired)
        );
    }
}
