//! Driving port for bond listings.

use async_trait::async_trait;

use crate::domain::{AccountId, Error};

use super::bond_command::BondPayload;

/// Request to list the caller's bonds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBondsRequest {
    pub owner: AccountId,
    /// Exact legal-name filter. Blank values are ignored.
    pub legal_name: Option<String>,
}

/// Bonds owned by the caller, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListBondsResponse {
    pub bonds: Vec<BondPayload>,
}

/// Driving port for bond reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BondQuery: Send + Sync {
    /// List bonds owned by `request.owner`.
    async fn list(&self, request: ListBondsRequest) -> Result<ListBondsResponse, Error>;
}
