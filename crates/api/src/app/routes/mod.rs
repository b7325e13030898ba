use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod system;
pub mod users;

/// Routes reachable without a bearer token.
pub fn public_router() -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/users/clients", post(users::create_client))
}

/// Routes that require a valid bearer token (see `middleware::auth_middleware`).
pub fn protected_router() -> Router {
    Router::new()
        .route("/api/v1/users/owners", post(users::create_owner))
        .route("/api/v1/users/employees", post(users::create_employee))
        .route("/api/v1/users/:id", get(users::get_user))
}
