//! Collaborator wiring for the HTTP application.

use std::sync::Arc;

use mesa_auth::{
    AuthenticationService, IdentityError, IdentityStore, PasswordHasher, ProvisioningService,
    RoleCatalog, TokenCodec,
};
use mesa_infra::{
    AppConfig, Argon2PasswordHasher, BootstrapOutcome, Hs256TokenCodec, InMemoryIdentityStore,
    InMemoryRoleCatalog, bootstrap_admin,
};

/// Use cases and the token codec shared by all handlers.
#[derive(Clone)]
pub struct AppServices {
    pub provisioning: ProvisioningService,
    pub authentication: AuthenticationService,
    pub codec: Arc<dyn TokenCodec>,
}

impl AppServices {
    /// Wire the use cases over explicit collaborators.
    pub fn new(
        store: Arc<dyn IdentityStore>,
        roles: Arc<dyn RoleCatalog>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
        token_lifetime: chrono::Duration,
    ) -> Self {
        Self {
            provisioning: ProvisioningService::new(store.clone(), roles, hasher.clone()),
            authentication: AuthenticationService::new(store, hasher, codec.clone(), token_lifetime),
            codec,
        }
    }
}

/// Run a use-case call on the blocking pool.
///
/// Provisioning and login hash or verify passwords (Argon2id), which must not
/// occupy an async worker.
pub async fn run_blocking<T, F>(
    services: Arc<AppServices>,
    call: F,
) -> Result<T, tokio::task::JoinError>
where
    F: FnOnce(&AppServices) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&services)).await
}

/// In-memory collaborators + default administrator bootstrap.
pub fn build_services(config: &AppConfig) -> Result<AppServices, IdentityError> {
    let store = Arc::new(InMemoryIdentityStore::new());
    let roles = Arc::new(InMemoryRoleCatalog::seeded());
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let codec = Arc::new(Hs256TokenCodec::new(&config.jwt_secret));

    match &config.admin {
        Some(admin) => {
            if let BootstrapOutcome::Created(id) =
                bootstrap_admin(admin, &*store, &*roles, &*hasher)?
            {
                tracing::info!(user_id = %id, "bootstrap complete");
            }
        }
        None => tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; skipping admin bootstrap"),
    }

    Ok(AppServices::new(
        store,
        roles,
        hasher,
        codec,
        config.token_lifetime,
    ))
}
