//! Session resolution middleware.
//!
//! Turns an inbound credential into an `Identity` in request extensions.
//! Resolution never rejects a request by itself: allow/deny belongs to the
//! route gates, which also decide between 401 and 403.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use matreq_auth::{Identity, SessionVerifier};
use matreq_core::SessionId;

use crate::stores::{SessionStore, UserStore};

pub const SESSION_COOKIE: &str = "matreq_session";

/// Session id of the resolved request, kept alongside `Identity` so logout
/// can destroy the right record.
#[derive(Debug, Copy, Clone)]
pub struct CurrentSession(pub SessionId);

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn SessionVerifier>,
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<SessionStore>,
}

pub async fn session_resolver(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some((identity, sid)) = resolve_identity(&state, req.headers()) {
        req.extensions_mut().insert(CurrentSession(sid));
        req.extensions_mut().insert(identity);
    }
    next.run(req).await
}

/// Resolve a credential to an identity, or `None`.
///
/// Absent, malformed, expired, revoked and user-gone tokens are
/// deliberately indistinguishable here: every failure collapses into the
/// same unauthenticated outcome.
fn resolve_identity(state: &AuthState, headers: &HeaderMap) -> Option<(Identity, SessionId)> {
    let token = extract_token(headers)?;
    let claims = state.verifier.verify(token, Utc::now()).ok()?;

    if !state.sessions.contains(claims.sid) {
        return None;
    }

    // Re-read the account so role changes apply from the next request on.
    let user = state.users.find_by_id(claims.sub)?;

    if !user.role.is_known() {
        tracing::warn!(
            user_id = %user.id,
            role = user.role.as_str(),
            "account carries an unknown role; treating as zero privilege"
        );
    }

    let identity = Identity {
        user_id: user.id,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
    };
    Some((identity, claims.sid))
}

/// Pull the session token from `Authorization: Bearer` or, failing that,
/// the session cookie. A malformed header reads the same as an absent one.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find(|token| !token.is_empty())
}
