use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mesa_auth::IdentityError;

pub fn identity_error_to_response(err: IdentityError) -> axum::response::Response {
    let status = match &err {
        IdentityError::InvalidEmail
        | IdentityError::InvalidPhone
        | IdentityError::InvalidDocument
        | IdentityError::UnderageUser(_)
        | IdentityError::InvalidRestaurantBinding(_) => StatusCode::BAD_REQUEST,
        IdentityError::IdentityAlreadyExists(_) => StatusCode::CONFLICT,
        IdentityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        IdentityError::RoleNotFound(_) | IdentityError::Infrastructure(_) => {
            tracing::error!(error = %err, "request failed on a server-side fault");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_error(status, err.code(), err.to_string())
}

/// A use-case task that panicked or was cancelled.
pub fn join_error_to_response(err: tokio::task::JoinError) -> axum::response::Response {
    tracing::error!(error = %err, "use-case task did not complete");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "Internal server error",
    )
}

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
