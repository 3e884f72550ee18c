//! Driving port for bond registration.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountId, BondRecord, Error};

/// Raw registration input. Fields are validated by the use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBondRequest {
    pub owner: AccountId,
    pub isin: String,
    pub lei: String,
    pub size: String,
    pub currency: String,
    pub maturity: String,
}

/// Serializable view of a stored bond record.
///
/// `size` is rendered with exactly two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BondPayload {
    #[schema(example = "XS0000000001")]
    pub isin: String,
    #[schema(example = "100.00")]
    pub size: String,
    #[schema(example = "USD")]
    pub currency: String,
    #[schema(value_type = String, format = Date, example = "2030-01-01")]
    pub maturity: NaiveDate,
    #[schema(example = "5493001KJTIIGC8Y1R12")]
    pub lei: String,
    #[schema(example = "AcmeBank")]
    pub legal_name: String,
}

impl From<&BondRecord> for BondPayload {
    fn from(record: &BondRecord) -> Self {
        Self {
            isin: record.isin.to_string(),
            size: record.notional.to_string(),
            currency: record.currency.to_string(),
            maturity: record.maturity,
            lei: record.lei.to_string(),
            legal_name: record.legal_name.to_string(),
        }
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBondResponse {
    pub bond: BondPayload,
}

/// Driving port for bond mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BondCommand: Send + Sync {
    /// Validate, enrich, and persist one bond for the requesting owner.
    async fn register(&self, request: RegisterBondRequest) -> Result<RegisterBondResponse, Error>;
}
