//! Password hashing and token signing adapters.

pub mod jwt;
pub mod password;

pub use jwt::Hs256TokenCodec;
pub use password::Argon2PasswordHasher;
