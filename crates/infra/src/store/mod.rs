//! Identity persistence and role catalog adapters.

pub mod in_memory;

pub use in_memory::{InMemoryIdentityStore, InMemoryRoleCatalog};
