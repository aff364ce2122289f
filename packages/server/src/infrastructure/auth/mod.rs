//! Credential handling implementations.
//!
//! - `jwt`: HS256 bearer tokens
//! - `password`: bcrypt password hashing

pub mod jwt;
pub mod password;

pub use jwt::JwtAuthProvider;
pub use password::BcryptPasswordHasher;
