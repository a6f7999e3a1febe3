//! Session lifecycle routes: login, logout, whoami.

use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use matreq_auth::Identity;

use crate::app::{errors, services::AppServices};
use crate::middleware::{CurrentSession, SESSION_COOKIE};
use crate::session::SessionIssuer;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - verify credentials and mint a session token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(issuer): Extension<SessionIssuer>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    // Unknown email and wrong password collapse into one answer.
    let Some(user) = services.users.verify_login(&body.email, &body.password) else {
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid email or password",
        );
    };

    let now = Utc::now();
    services.sessions.purge_expired(now);

    let (claims, token) = match issuer.issue(&user, now) {
        Ok(minted) => minted,
        Err(_) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "session_error",
                "failed to create session",
            );
        }
    };
    services.sessions.insert(claims.sid, claims.expires_at);

    tracing::info!(user_id = %user.id, "session created");

    let mut response = (
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "expires_at": claims.expires_at,
        })),
    )
        .into_response();

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// POST /auth/logout - destroy the server-side session record.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Extension(CurrentSession(sid)): Extension<CurrentSession>,
) -> axum::response::Response {
    services.sessions.remove(sid);
    tracing::info!(user_id = %identity.user_id, "session destroyed");

    (
        StatusCode::OK,
        Json(serde_json::json!({ "logged_out": true })),
    )
        .into_response()
}

/// GET /whoami - echo the resolved identity.
pub async fn whoami(Extension(identity): Extension<Identity>) -> impl IntoResponse {
    Json(serde_json::json!({
        "user_id": identity.user_id.to_string(),
        "email": identity.email,
        "display_name": identity.display_name,
        "role": identity.role.as_str(),
    }))
}
