use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use mesa_auth::IdentityError;

use crate::app::dto::{AuthResponse, LoginRequest};
use crate::app::errors;
use crate::app::services::{AppServices, run_blocking};

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    if let Err(msg) = body.validate() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", msg);
    }

    let issued = run_blocking(services, move |s| {
        let token = s.authentication.authenticate(&body.email, &body.password)?;
        // Echo the issued claims back, read from the token itself.
        let claims = s
            .codec
            .claims(&token)
            .map_err(|e| IdentityError::Infrastructure(e.to_string()))?;
        Ok::<_, IdentityError>(AuthResponse::bearer(token, claims))
    })
    .await;

    match issued {
        Ok(Ok(resp)) => (StatusCode::OK, Json(resp)).into_response(),
        Ok(Err(e)) => errors::identity_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}
