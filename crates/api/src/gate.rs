//! Route gates: apply a guard decision in front of a handler.
//!
//! Per request this is a straight line: either the guard allows and the
//! wrapped handler runs exactly once, or it denies and an error response
//! goes out without the handler ever running. Deny responses are uniform:
//! 401 for a missing identity, one indistinguishable 403 for both
//! insufficient-role and missing-permission.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use matreq_auth::{Denial, Identity, Permission, Role, guard};

use crate::app::errors;

pub async fn require_role(min: Role, req: Request, next: Next) -> Response {
    let decision = guard::require_role(req.extensions().get::<Identity>(), &min);
    match decision {
        Ok(()) => next.run(req).await,
        Err(denial) => deny(denial, &req),
    }
}

pub async fn require_permission(permission: Permission, req: Request, next: Next) -> Response {
    let decision = guard::require_permission(req.extensions().get::<Identity>(), &permission);
    match decision {
        Ok(()) => next.run(req).await,
        Err(denial) => deny(denial, &req),
    }
}

/// Browser-facing variant: an unauthenticated request is redirected to the
/// login page with the original path preserved in `next`, instead of
/// getting a bare 401.
pub async fn require_role_page(min: Role, req: Request, next: Next) -> Response {
    let decision = guard::require_role(req.extensions().get::<Identity>(), &min);
    match decision {
        Ok(()) => next.run(req).await,
        Err(Denial::NoIdentity) => {
            Redirect::to(&format!("/login?next={}", req.uri().path())).into_response()
        }
        Err(denial) => deny(denial, &req),
    }
}

fn deny(denial: Denial, req: &Request) -> Response {
    match denial {
        Denial::NoIdentity => {
            tracing::debug!(path = req.uri().path(), "denied: no authenticated identity");
            errors::unauthenticated()
        }
        Denial::InsufficientRole | Denial::MissingPermission => {
            tracing::info!(path = req.uri().path(), reason = %denial, "denied");
            errors::forbidden()
        }
    }
}
