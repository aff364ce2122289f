//! UseCase: account registration, login and bearer token authentication

use std::sync::Arc;

use studysphere_shared::time::Clock;

use crate::domain::{
    AuthError, AuthProvider, Email, PasswordHasher, RepositoryError, Timestamp, UserAccount,
    UserId, UserStore, Username,
};

use super::error::AccountError;

/// A freshly issued token together with the account it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserAccount,
}

pub struct RegisterUserUseCase {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    auth: Arc<dyn AuthProvider>,
    clock: Arc<dyn Clock>,
}

impl RegisterUserUseCase {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        auth: Arc<dyn AuthProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            auth,
            clock,
        }
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - blank username, malformed email or empty password
    /// * `EmailTaken` / `UsernameTaken` - uniqueness violated
    pub async fn execute(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<AuthSession, AccountError> {
        let username = Username::new(username)?;
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(AccountError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }

        // 1. 一意性チェック（email → username の順）
        if self
            .users
            .find_by_email(&email)
            .await
            .map_err(storage_error)?
            .is_some()
        {
            return Err(AccountError::EmailTaken);
        }
        if self
            .users
            .find_by_username(&username)
            .await
            .map_err(storage_error)?
            .is_some()
        {
            return Err(AccountError::UsernameTaken);
        }

        // 2. パスワードのハッシュ化（CPU 負荷が高いためブロッキングスレッドで実行）
        let hasher = self.hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?
            .map_err(auth_error)?;

        // 3. 保存
        let account = UserAccount {
            id: UserId::generate(),
            username,
            email,
            password_hash,
            created_at: Timestamp::new(self.clock.now_millis()),
        };
        self.users
            .insert(account.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict("email") => AccountError::EmailTaken,
                RepositoryError::Conflict(_) => AccountError::UsernameTaken,
                other => storage_error(other),
            })?;

        // 4. トークン発行
        let token = self.auth.issue_token(&account.id).map_err(auth_error)?;
        tracing::info!("Account '{}' registered as '{}'", account.id, account.username);

        Ok(AuthSession {
            token,
            user: account,
        })
    }
}

pub struct LoginUseCase {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    auth: Arc<dyn AuthProvider>,
}

impl LoginUseCase {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            users,
            hasher,
            auth,
        }
    }

    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn execute(
        &self,
        email: String,
        password: String,
    ) -> Result<AuthSession, AccountError> {
        let email = Email::new(email).map_err(|_| AccountError::InvalidCredentials)?;

        let Some(account) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(storage_error)?
        else {
            tracing::debug!("Login attempt for unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let hasher = self.hasher.clone();
        let password_hash = account.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
                .await
                .map_err(|e| AccountError::Internal(e.to_string()))?
                .map_err(auth_error)?;
        if !verified {
            tracing::debug!("Wrong password for account '{}'", account.id);
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.auth.issue_token(&account.id).map_err(auth_error)?;
        tracing::info!("Account '{}' logged in", account.id);

        Ok(AuthSession {
            token,
            user: account,
        })
    }
}

/// Resolves a bearer token to its account
pub struct AuthenticateUseCase {
    users: Arc<dyn UserStore>,
    auth: Arc<dyn AuthProvider>,
}

impl AuthenticateUseCase {
    pub fn new(users: Arc<dyn UserStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { users, auth }
    }

    pub async fn execute(&self, token: &str) -> Result<UserAccount, AccountError> {
        let user_id = self.auth.verify(token).map_err(auth_error)?;
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(storage_error)?
            .ok_or(AccountError::Unauthorized)
    }
}

fn storage_error(error: RepositoryError) -> AccountError {
    AccountError::Internal(error.to_string())
}

fn auth_error(error: AuthError) -> AccountError {
    match error {
        AuthError::Unauthorized => AccountError::Unauthorized,
        other => AccountError::Internal(other.to_string()),
    }
}
