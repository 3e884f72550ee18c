//! Credential use cases: signup and verification.
//!
//! Implements the [`CredentialStore`] driving port on top of an account
//! repository and a password hasher. Raw passwords never leave this module
//! except as input to the hasher.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, CredentialStore, PasswordHashError, PasswordHasher,
};
use crate::domain::{
    Account, AccountId, AccountValidationError, Credentials, CredentialsValidationError, Error,
    Username,
};

/// Typed signup failures. Converted into [`Error`] at the port boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{message}")]
    Validation { message: String },
    #[error("username {username} is already taken")]
    DuplicateUsername { username: String },
    #[error("account store unavailable: {message}")]
    Unavailable { message: String },
    #[error("account store failure: {message}")]
    Internal { message: String },
}

impl From<CredentialsValidationError> for SignupError {
    fn from(value: CredentialsValidationError) -> Self {
        Self::MissingField {
            field: value.field(),
        }
    }
}

impl From<AccountValidationError> for SignupError {
    fn from(value: AccountValidationError) -> Self {
        Self::Validation {
            message: value.to_string(),
        }
    }
}

impl From<AccountRepositoryError> for SignupError {
    fn from(value: AccountRepositoryError) -> Self {
        match value {
            AccountRepositoryError::DuplicateUsername { username } => {
                Self::DuplicateUsername { username }
            }
            AccountRepositoryError::Connection { message } => Self::Unavailable { message },
            AccountRepositoryError::Query { message } => Self::Internal { message },
        }
    }
}

impl From<PasswordHashError> for SignupError {
    fn from(value: PasswordHashError) -> Self {
        Self::Internal {
            message: value.to_string(),
        }
    }
}

impl From<SignupError> for Error {
    fn from(value: SignupError) -> Self {
        match value {
            SignupError::MissingField { field } => {
                Error::invalid_request(format!("{field} is required"))
                    .with_details(json!({ "code": "missing_field", "field": field }))
            }
            SignupError::Validation { message } => Error::invalid_request(message)
                .with_details(json!({ "code": "validation_error", "field": "username" })),
            SignupError::DuplicateUsername { .. } => Error::conflict("username is already taken")
                .with_details(json!({ "code": "duplicate_username" })),
            SignupError::Unavailable { message } => {
                Error::service_unavailable(format!("account store unavailable: {message}"))
            }
            SignupError::Internal { message } => {
                Error::internal(format!("account store failure: {message}"))
            }
        }
    }
}

/// Credential service implementing [`CredentialStore`].
pub struct CredentialService<R: ?Sized, H: ?Sized> {
    accounts: Arc<R>,
    hasher: Arc<H>,
}

impl<R: ?Sized, H: ?Sized> Clone for CredentialService<R, H> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<R: ?Sized, H: ?Sized> CredentialService<R, H> {
    /// Create a service from its driven ports.
    pub fn new(accounts: Arc<R>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

impl<R, H> CredentialService<R, H>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn signup(&self, credentials: &Credentials) -> Result<Account, SignupError> {
        let username = Username::new(credentials.username())?;
        if self.accounts.find_by_username(&username).await?.is_some() {
            return Err(SignupError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        let password_hash = self.hasher.hash(credentials.password()).await?;
        let account = Account::new(AccountId::random(), username, password_hash);
        // The storage constraint decides races between concurrent signups.
        self.accounts.insert(&account).await?;
        info!(account_id = %account.id(), username = %account.username(), "account created");
        Ok(account)
    }
}

#[async_trait]
impl<R, H> CredentialStore for CredentialService<R, H>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn create_account(&self, credentials: &Credentials) -> Result<Account, Error> {
        self.signup(credentials).await.map_err(Error::from)
    }

    async fn verify(&self, credentials: &Credentials) -> Result<Option<Account>, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Ok(None);
        };
        let account = self
            .accounts
            .find_by_username(&username)
            .await
            .map_err(|err| Error::from(SignupError::from(err)))?;
        let Some(account) = account else {
            debug!("credential verification failed: unknown username");
            return Ok(None);
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        if matches {
            Ok(Some(account))
        } else {
            debug!(account_id = %account.id(), "credential verification failed: password mismatch");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
