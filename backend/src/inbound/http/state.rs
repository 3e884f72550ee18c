//! Shared HTTP adapter state.
//!
//! Handlers and the access gate receive this via `actix_web::web::Data` so
//! they depend only on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BondCommand, BondQuery, CredentialStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub credentials: Arc<dyn CredentialStore>,
    pub bonds: Arc<dyn BondCommand>,
    pub bonds_query: Arc<dyn BondQuery>,
}

impl HttpState {
    /// Bundle the driving ports served over HTTP.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        bonds: Arc<dyn BondCommand>,
        bonds_query: Arc<dyn BondQuery>,
    ) -> Self {
        Self {
            credentials,
            bonds,
            bonds_query,
        }
    }
}
