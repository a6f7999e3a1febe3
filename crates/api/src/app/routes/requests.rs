//! Material request routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Request},
    http::StatusCode,
    middleware::{Next, from_fn},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;

use matreq_auth::{Identity, permissions};
use matreq_core::{MaterialId, RequestId};

use crate::app::{errors, services::AppServices};
use crate::gate;

#[derive(Debug, Deserialize)]
pub struct CreateRequestBody {
    pub material_id: String,
    pub quantity: i64,
}

pub fn router() -> Router {
    let create = Router::new()
        .route("/requests", post(create_request))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_permission(permissions::CREATE_REQUESTS, req, next)
        }));

    let mine = Router::new()
        .route("/requests/mine", get(list_own_requests))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_permission(permissions::VIEW_OWN_REQUESTS, req, next)
        }));

    let all = Router::new()
        .route("/requests", get(list_all_requests))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_permission(permissions::VIEW_ALL_REQUESTS, req, next)
        }));

    let approve = Router::new()
        .route("/requests/:id/approve", post(approve_request))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_permission(permissions::APPROVE_REQUESTS, req, next)
        }));

    create.merge(mine).merge(all).merge(approve)
}

/// POST /requests - file a request for a material.
pub async fn create_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateRequestBody>,
) -> axum::response::Response {
    let material_id: MaterialId = match body.material_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid material id");
        }
    };

    if services.materials.get(material_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "material not found");
    }

    match services
        .requests
        .create(material_id, body.quantity, identity.user_id, Utc::now())
    {
        Ok(request) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "request": request })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

/// GET /requests - every request, for reviewers.
pub async fn list_all_requests(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    Json(serde_json::json!({ "requests": services.requests.list_all() }))
}

/// GET /requests/mine - the caller's own requests.
pub async fn list_own_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> impl IntoResponse {
    Json(serde_json::json!({ "requests": services.requests.list_for(identity.user_id) }))
}

/// POST /requests/:id/approve - approve a pending request.
pub async fn approve_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RequestId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid request id");
        }
    };

    match services.requests.approve(id, identity.user_id) {
        Ok(request) => {
            tracing::info!(request_id = %request.id, approved_by = %identity.user_id, "request approved");
            (StatusCode::OK, Json(serde_json::json!({ "request": request }))).into_response()
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}
