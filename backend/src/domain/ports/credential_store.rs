//! Driving port for signup and credential verification.
//!
//! Inbound adapters call this port to create accounts and to authenticate
//! callers without importing persistence or hashing infrastructure.

use async_trait::async_trait;

use crate::domain::{Account, Credentials, Error};

/// Domain use-case port for account credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Register a new account holding a salted hash of the password.
    ///
    /// Fails with a conflict when the username is already taken.
    async fn create_account(&self, credentials: &Credentials) -> Result<Account, Error>;

    /// Resolve the account matching `credentials`.
    ///
    /// Unknown usernames and wrong passwords both yield `Ok(None)`; errors are
    /// reserved for infrastructure faults.
    async fn verify(&self, credentials: &Credentials) -> Result<Option<Account>, Error>;
}
