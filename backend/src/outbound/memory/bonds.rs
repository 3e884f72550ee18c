//! In-process bond store keeping records in insertion order.
//!
//! Per-owner ISIN uniqueness is enforced under the same lock as the insert.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{BondRepository, BondRepositoryError};
use crate::domain::{AccountId, BondRecord, Isin, LegalName};

use super::lock;

/// Append-only bond store preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBondRepository {
    records: Mutex<Vec<BondRecord>>,
}

impl InMemoryBondRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BondRepository for InMemoryBondRepository {
    async fn exists(&self, owner: AccountId, isin: &Isin) -> Result<bool, BondRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .any(|record| record.owner == owner && &record.isin == isin))
    }

    async fn insert(&self, record: &BondRecord) -> Result<(), BondRepositoryError> {
        let mut records = lock(&self.records);
        if records
            .iter()
            .any(|existing| existing.owner == record.owner && existing.isin == record.isin)
        {
            return Err(BondRepositoryError::duplicate(record.isin.as_str()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: AccountId,
        legal_name: Option<LegalName>,
    ) -> Result<Vec<BondRecord>, BondRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .filter(|record| record.owner == owner)
            .filter(|record| legal_name.as_ref().is_none_or(|name| &record.legal_name == name))
            .cloned()
            .collect())
    }
}
