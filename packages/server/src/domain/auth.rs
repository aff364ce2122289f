//! Credential handling traits.

use super::{error::AuthError, value_object::UserId};

/// Issues and verifies bearer tokens
pub trait AuthProvider: Send + Sync {
    fn issue_token(&self, user_id: &UserId) -> Result<String, AuthError>;

    /// Returns the user the token was issued for, or `Unauthorized`
    fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}

/// One-way password hashing. Implementations may be CPU heavy; callers run
/// them off the async executor.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}
