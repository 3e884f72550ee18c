//! Driven port for bond record persistence.
//!
//! Every operation is scoped to an owning account; adapters must never return
//! rows belonging to another owner.
use async_trait::async_trait;

use crate::domain::{AccountId, BondRecord, Isin, LegalName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by bond repository adapters.
    pub enum BondRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "bond repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "bond repository query failed: {message}",
        /// The owner already holds a record for this ISIN.
        Duplicate { isin: String } => "bond {isin} is already registered for this owner",
    }
}

/// Port for reading and appending bond records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BondRepository: Send + Sync {
    /// Whether `owner` already holds a record for `isin`.
    async fn exists(&self, owner: AccountId, isin: &Isin) -> Result<bool, BondRepositoryError>;

    /// Append a record. A uniqueness violation on `(owner, isin)` surfaces as
    /// [`BondRepositoryError::Duplicate`].
    async fn insert(&self, record: &BondRecord) -> Result<(), BondRepositoryError>;

    /// All records for `owner` in insertion order, optionally restricted to an
    /// exact legal name.
    async fn list_by_owner(
        &self,
        owner: AccountId,
        legal_name: Option<LegalName>,
    ) -> Result<Vec<BondRecord>, BondRepositoryError>;
}
