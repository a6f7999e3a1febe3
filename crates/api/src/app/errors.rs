use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use matreq_core::DomainError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 401: no usable credential. The body never says why the credential
/// failed.
pub fn unauthenticated() -> axum::response::Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "unauthenticated",
        "authentication required",
    )
}

/// 403: authenticated but not allowed. Identical for every deny reason, so
/// responses cannot be used to probe which role or permission a route
/// wants.
pub fn forbidden() -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden")
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}
