use axum::{
    Router,
    extract::Request,
    middleware::{Next, from_fn},
    routing::{get, post},
};

use matreq_auth::roles;

use crate::gate;

pub mod admin;
pub mod auth;
pub mod materials;
pub mod pages;
pub mod requests;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    let session = Router::new()
        .route("/whoami", get(auth::whoami))
        .route("/auth/logout", post(auth::logout))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_role(roles::USER, req, next)
        }));

    Router::new()
        .merge(session)
        .merge(materials::router())
        .merge(requests::router())
        .nest("/admin", admin::router())
        .merge(pages::router())
}
