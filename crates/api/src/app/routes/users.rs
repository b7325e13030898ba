use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use mesa_auth::{Candidate, Identity, IdentityResult, RoleName};
use mesa_core::UserId;

use crate::app::dto::{CreateIdentityRequest, UserResponse};
use crate::app::errors;
use crate::app::services::{AppServices, run_blocking};
use crate::authz::require_role;
use crate::context::PrincipalContext;

type Provision = fn(&AppServices, Candidate) -> IdentityResult<Identity>;

/// Only administrators create owners.
pub async fn create_owner(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateIdentityRequest>,
) -> axum::response::Response {
    if let Err(resp) = require_role(&principal, RoleName::Admin) {
        return resp;
    }
    create(services, body, |s, c| s.provisioning.create_owner(c)).await
}

/// Only owners create employees.
pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateIdentityRequest>,
) -> axum::response::Response {
    if let Err(resp) = require_role(&principal, RoleName::Owner) {
        return resp;
    }
    create(services, body, |s, c| s.provisioning.create_employee(c)).await
}

/// Client self-registration (public).
pub async fn create_client(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateIdentityRequest>,
) -> axum::response::Response {
    create(services, body, |s, c| s.provisioning.create_client(c)).await
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match id.parse::<UserId>() {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()),
    };

    match services.provisioning.get_by_id(id) {
        Ok(Some(identity)) => {
            (StatusCode::OK, Json(UserResponse::from(&identity))).into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "User not found"),
        Err(e) => errors::identity_error_to_response(e),
    }
}

async fn create(
    services: Arc<AppServices>,
    body: CreateIdentityRequest,
    provision: Provision,
) -> axum::response::Response {
    let candidate = match body.into_candidate() {
        Ok(c) => c,
        Err(msg) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
    };

    match run_blocking(services, move |s| provision(s, candidate)).await {
        Ok(Ok(identity)) => {
            (StatusCode::CREATED, Json(UserResponse::from(&identity))).into_response()
        }
        Ok(Err(e)) => errors::identity_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}
