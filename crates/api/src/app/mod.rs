//! HTTP application wiring (axum router + middleware stack).
//!
//! This folder is structured like:
//! - `services.rs`: store wiring shared across handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use matreq_auth::{Hs256SessionCodec, roles};

use crate::config::ApiConfig;
use crate::middleware::{self, AuthState};
use crate::session::SessionIssuer;
use crate::stores::UserStore;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(config: &ApiConfig) -> Router {
    let codec = Arc::new(Hs256SessionCodec::new(config.session_secret.as_bytes()));
    let services = Arc::new(services::AppServices::new());

    if let Some(admin) = &config.bootstrap_admin {
        match services
            .users
            .create(&admin.email, &admin.display_name, roles::ADMIN, &admin.password)
        {
            Ok(user) => tracing::info!(email = %user.email, "bootstrapped admin account"),
            Err(err) => tracing::error!(%err, "failed to bootstrap admin account"),
        }
    }

    let users: Arc<dyn UserStore> = services.users.clone();
    let auth_state = AuthState {
        verifier: codec.clone(),
        users,
        sessions: services.sessions.clone(),
    };

    let issuer = SessionIssuer {
        codec,
        ttl: config.session_ttl,
    };

    // Everything except login/health sits behind the resolver; the gates
    // on each route group make the allow/deny call.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::session_resolver,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/login", post(routes::auth::login))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(Extension(issuer)),
        )
}
