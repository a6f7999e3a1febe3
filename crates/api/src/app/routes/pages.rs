//! Browser-facing page routes.
//!
//! Pages run through the same guard as the API; the only difference is
//! that an unauthenticated browser is redirected to the login page (with
//! the original path in `next`) instead of receiving a bare 401.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Request},
    middleware::{Next, from_fn},
    response::IntoResponse,
    routing::get,
};

use matreq_auth::{Identity, roles};

use crate::app::services::AppServices;
use crate::gate;
use crate::stores::RequestStatus;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_role_page(roles::USER, req, next)
        }))
}

/// GET /dashboard - minimal landing payload for the web shell.
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> impl IntoResponse {
    let open_requests = services
        .requests
        .list_all()
        .iter()
        .filter(|r| r.status == RequestStatus::Pending)
        .count();

    Json(serde_json::json!({
        "display_name": identity.display_name,
        "role": identity.role.as_str(),
        "materials": services.materials.list().len(),
        "open_requests": open_requests,
    }))
}
