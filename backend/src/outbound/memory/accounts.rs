//! In-process account store keyed by username.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, Username};

use super::lock;

/// Account store keyed by exact username.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<Username, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut accounts = lock(&self.accounts);
        if accounts.contains_key(account.username()) {
            return Err(AccountRepositoryError::duplicate_username(
                account.username().as_str(),
            ));
        }
        accounts.insert(account.username().clone(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(lock(&self.accounts).get(username).cloned())
    }
}
