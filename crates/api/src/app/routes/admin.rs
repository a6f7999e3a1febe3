//! Admin routes for account administration.
//!
//! The whole group sits behind an ADMIN role gate composed with the
//! MANAGE_USERS permission gate; both must allow.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Request},
    http::StatusCode,
    middleware::{Next, from_fn},
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;

use matreq_auth::{Role, permissions, roles};
use matreq_core::UserId;

use crate::app::{errors, services::AppServices};
use crate::gate;
use crate::stores::UserRecord;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id/role", put(set_role))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_permission(permissions::MANAGE_USERS, req, next)
        }))
        .route_layer(from_fn(|req: Request, next: Next| {
            gate::require_role(roles::ADMIN, req, next)
        }))
}

fn user_json(user: UserRecord) -> serde_json::Value {
    serde_json::json!({
        "id": user.id.to_string(),
        "email": user.email,
        "display_name": user.display_name,
        "role": user.role.as_str(),
    })
}

/// GET /admin/users - list all accounts.
pub async fn list_users(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let users: Vec<_> = services.users.list().into_iter().map(user_json).collect();
    Json(serde_json::json!({ "users": users }))
}

/// POST /admin/users - create an account.
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateUserRequest>,
) -> axum::response::Response {
    let role = Role::new(body.role);
    if !role.is_known() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_role",
            "role must be one of: USER, STAFF, MANAGER, ADMIN",
        );
    }

    match services
        .users
        .create(&body.email, &body.display_name, role, &body.password)
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "user": user_json(user) })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

/// PUT /admin/users/:id/role - change an account's role.
///
/// Takes effect on the target's next request; identities already resolved
/// for in-flight requests are not revisited.
pub async fn set_role(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<SetRoleRequest>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    let role = Role::new(body.role);
    if !role.is_known() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_role",
            "role must be one of: USER, STAFF, MANAGER, ADMIN",
        );
    }

    match services.users.set_role(id, role) {
        Ok(user) => {
            tracing::info!(user_id = %user.id, role = user.role.as_str(), "role changed");
            (StatusCode::OK, Json(serde_json::json!({ "user": user_json(user) }))).into_response()
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}
