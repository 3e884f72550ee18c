//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Derivation runs on tokio's blocking pool so a login does not stall the
//! HTTP worker that received it.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use tokio::task::{JoinError, spawn_blocking};
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id with the crate's default parameters and a fresh random salt per
/// hash. Hashes are stored in PHC string format.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?
        .to_string();
    PasswordHash::new(encoded).map_err(|err| PasswordHashError::hashing(err.to_string()))
}

fn verify_blocking(password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
    let parsed = PhcHash::new(hash.as_str())
        .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::hashing(err.to_string())),
    }
}

fn join_error(err: JoinError) -> PasswordHashError {
    PasswordHashError::hashing(format!("hashing task did not complete: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.clone();
        spawn_blocking(move || verify_blocking(&password, &hash))
            .await
            .map_err(join_error)?
    }
}
