//! Infrastructure layer: collaborator adapters, configuration, bootstrap.

pub mod bootstrap;
pub mod config;
pub mod security;
pub mod store;

pub use bootstrap::{BootstrapOutcome, bootstrap_admin};
pub use config::{AdminConfig, AppConfig, ConfigError};
pub use security::{Argon2PasswordHasher, Hs256TokenCodec};
pub use store::{InMemoryIdentityStore, InMemoryRoleCatalog};
