//! InMemory UserStore 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Email, RepositoryError, UserAccount, UserId, UserStore, Username};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, account: UserAccount) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().await;
        if users.values().any(|user| user.email == account.email) {
            return Err(RepositoryError::Conflict("email"));
        }
        if users.values().any(|user| user.username == account.username) {
            return Err(RepositoryError::Conflict("username"));
        }
        users.insert(account.id.clone(), account);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(self.users.lock().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserAccount>, RepositoryError> {
        let users = self.users.lock().await;
        Ok(users.values().find(|user| &user.email == email).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, RepositoryError> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }
}
