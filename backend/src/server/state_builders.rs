//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use bondbook::domain::ports::{AccountRepository, BondRepository};
use bondbook::domain::{BondCommandService, BondQueryService, CredentialService};
use bondbook::inbound::http::state::HttpState;
use bondbook::outbound::memory::{InMemoryAccountRepository, InMemoryBondRepository};
use bondbook::outbound::password::Argon2PasswordHasher;
use bondbook::outbound::persistence::{DieselAccountRepository, DieselBondRepository};

use super::ServerConfig;

/// Pick PostgreSQL repositories when a pool is configured, in-process stores
/// otherwise.
fn build_repositories(
    config: &ServerConfig,
) -> (Arc<dyn AccountRepository>, Arc<dyn BondRepository>) {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            (
                Arc::new(DieselAccountRepository::new(pool.clone())),
                Arc::new(DieselBondRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; using in-process repositories");
            (
                Arc::new(InMemoryAccountRepository::new()),
                Arc::new(InMemoryBondRepository::new()),
            )
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (accounts, bonds) = build_repositories(config);
    let credentials = CredentialService::new(accounts, Arc::new(Argon2PasswordHasher::new()));
    let command = BondCommandService::new(Arc::clone(&bonds), Arc::clone(&config.registry));
    let query = BondQueryService::new(bonds);

    web::Data::new(HttpState::new(
        Arc::new(credentials),
        Arc::new(command),
        Arc::new(query),
    ))
}
