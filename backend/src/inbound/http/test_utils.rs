//! Test helpers wiring HTTP state onto in-process adapters.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::domain::ports::{LeiLookupError, LeiRecordSource, PasswordHashError, PasswordHasher};
use crate::domain::{BondCommandService, BondQueryService, CredentialService, Lei, PasswordHash};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryAccountRepository, InMemoryBondRepository};

/// LEI source answering every lookup with the same outcome.
pub struct StubLeiSource {
    outcome: Result<String, LeiLookupError>,
}

impl StubLeiSource {
    pub fn named(name: &str) -> Self {
        Self {
            outcome: Ok(name.to_owned()),
        }
    }

    pub fn failing(error: LeiLookupError) -> Self {
        Self { outcome: Err(error) }
    }
}

#[async_trait]
impl LeiRecordSource for StubLeiSource {
    async fn legal_name(&self, _lei: &Lei) -> Result<String, LeiLookupError> {
        self.outcome.clone()
    }
}

/// Reversible hasher keeping request tests fast.
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        PasswordHash::new(format!("plain:{password}"))
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(hash.as_str() == format!("plain:{password}"))
    }
}

/// HTTP state over fresh in-memory stores and the given LEI source.
pub fn memory_state(registry: impl LeiRecordSource + 'static) -> HttpState {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let bonds = Arc::new(InMemoryBondRepository::new());
    let registry = Arc::new(registry);
    HttpState::new(
        Arc::new(CredentialService::new(accounts, Arc::new(PlainHasher))),
        Arc::new(BondCommandService::new(bonds.clone(), registry)),
        Arc::new(BondQueryService::new(bonds)),
    )
}

/// `Authorization` header value for HTTP Basic credentials.
pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
