//! Material catalog routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Request},
    http::StatusCode,
    middleware::{Next, from_fn},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use matreq_auth::{Identity, permissions};

use crate::app::{errors, services::AppServices};
use crate::gate;

#[derive(Debug, Deserialize)]
pub struct CreateMaterialRequest {
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
}

pub fn router() -> Router {
    let read = Router::new()
        .route("/materials", get(list_materials))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_permission(permissions::VIEW_MATERIALS, req, next)
        }));

    let write = Router::new()
        .route("/materials", post(create_material))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_permission(permissions::MANAGE_MATERIALS, req, next)
        }));

    read.merge(write)
}

/// GET /materials - list the catalog.
pub async fn list_materials(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    Json(serde_json::json!({ "materials": services.materials.list() }))
}

/// POST /materials - add a catalog record.
pub async fn create_material(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateMaterialRequest>,
) -> axum::response::Response {
    match services
        .materials
        .create(&body.name, body.quantity, identity.user_id)
    {
        Ok(material) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "material": material })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
