//! API-side role guard for provisioning routes.
//!
//! Roles are data; each route names the single role allowed to call it.

use axum::http::StatusCode;

use mesa_auth::RoleName;

use crate::app::errors;
use crate::context::PrincipalContext;

/// Reject the request with 403 unless the caller holds `required`.
pub fn require_role(
    principal: &PrincipalContext,
    required: RoleName,
) -> Result<(), axum::response::Response> {
    if principal.role() == required {
        return Ok(());
    }
    tracing::debug!(
        user_id = %principal.user_id(),
        role = %principal.role(),
        required = %required,
        "role check failed"
    );
    Err(errors::json_error(
        StatusCode::FORBIDDEN,
        "forbidden",
        format!("Only {required} can perform this action"),
    ))
}
