//! Bond use cases: registration with LEI enrichment, and per-owner listing.
//!
//! Registration runs in a fixed order: check for a duplicate, resolve the
//! legal name, parse the remaining terms, then insert. A duplicate therefore
//! wins over malformed size or maturity input. A failed insert after a
//! successful lookup is not compensated.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    BondCommand, BondPayload, BondQuery, BondRepository, BondRepositoryError, LeiLookupError,
    LeiRecordSource, ListBondsRequest, ListBondsResponse, RegisterBondRequest,
    RegisterBondResponse,
};
use crate::domain::{
    BondRecord, BondTerms, BondValidationError, Error, Isin, LegalName, LegalNameError, Lei,
};

/// Typed registration failures. Converted into [`Error`] at the port boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BondRegistrationError {
    #[error(transparent)]
    Validation(#[from] BondValidationError),
    #[error("bond {isin} has already been added")]
    Duplicate { isin: String },
    #[error(transparent)]
    Lookup(#[from] LeiLookupError),
    #[error("registry returned an unusable legal name: {0}")]
    LegalName(#[from] LegalNameError),
    #[error(transparent)]
    Repository(BondRepositoryError),
}

impl From<BondRepositoryError> for BondRegistrationError {
    fn from(value: BondRepositoryError) -> Self {
        match value {
            BondRepositoryError::Duplicate { isin } => Self::Duplicate { isin },
            other => Self::Repository(other),
        }
    }
}

fn map_repository_error(error: BondRepositoryError) -> Error {
    match error {
        BondRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("bond repository unavailable: {message}"))
        }
        BondRepositoryError::Query { message } => {
            Error::internal(format!("bond repository error: {message}"))
        }
        BondRepositoryError::Duplicate { isin } => {
            Error::from(BondRegistrationError::Duplicate { isin })
        }
    }
}

impl From<BondRegistrationError> for Error {
    fn from(value: BondRegistrationError) -> Self {
        match value {
            BondRegistrationError::Validation(err) => Error::invalid_request(err.to_string())
                .with_details(json!({ "code": "validation_error", "field": err.field() })),
            BondRegistrationError::Duplicate { .. } => Error::conflict("bond has already been added")
                .with_details(json!({ "code": "duplicate_bond" })),
            BondRegistrationError::Lookup(err) => {
                Error::upstream_failure("could not resolve the legal entity name")
                    .with_details(json!({ "code": "lookup_failure", "kind": err.kind() }))
            }
            BondRegistrationError::LegalName(_) => {
                Error::upstream_failure("could not resolve the legal entity name")
                    .with_details(json!({ "code": "lookup_failure", "kind": "invalid_name" }))
            }
            BondRegistrationError::Repository(err) => map_repository_error(err),
        }
    }
}

/// Registration service implementing [`BondCommand`].
pub struct BondCommandService<R: ?Sized, L: ?Sized> {
    bonds: Arc<R>,
    registry: Arc<L>,
}

impl<R: ?Sized, L: ?Sized> Clone for BondCommandService<R, L> {
    fn clone(&self) -> Self {
        Self {
            bonds: Arc::clone(&self.bonds),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R: ?Sized, L: ?Sized> BondCommandService<R, L> {
    /// Create a registration service from its driven ports.
    pub fn new(bonds: Arc<R>, registry: Arc<L>) -> Self {
        Self { bonds, registry }
    }
}

impl<R, L> BondCommandService<R, L>
where
    R: BondRepository + ?Sized,
    L: LeiRecordSource + ?Sized,
{
    async fn register_bond(
        &self,
        request: &RegisterBondRequest,
    ) -> Result<BondRecord, BondRegistrationError> {
        // A malformed ISIN cannot match a stored record.
        if let Ok(isin) = Isin::new(&request.isin) {
            if self.bonds.exists(request.owner, &isin).await? {
                return Err(BondRegistrationError::Duplicate {
                    isin: isin.to_string(),
                });
            }
        }

        // The registry cannot resolve a malformed code.
        let lei = Lei::new(&request.lei)?;
        let raw_name = self.registry.legal_name(&lei).await.map_err(|err| {
            warn!(%lei, kind = err.kind(), error = %err, "legal name lookup failed");
            err
        })?;
        let legal_name = LegalName::from_registry(&raw_name).map_err(|err| {
            warn!(%lei, error = %err, "registry returned an unusable legal name");
            err
        })?;

        let terms = BondTerms::parse(
            &request.isin,
            &request.lei,
            &request.size,
            &request.currency,
            &request.maturity,
        )?;
        let record = BondRecord::from_terms(request.owner, terms, legal_name);
        self.bonds.insert(&record).await?;
        info!(
            owner = %record.owner,
            isin = %record.isin,
            legal_name = %record.legal_name,
            "bond registered"
        );
        Ok(record)
    }
}

#[async_trait]
impl<R, L> BondCommand for BondCommandService<R, L>
where
    R: BondRepository + ?Sized,
    L: LeiRecordSource + ?Sized,
{
    async fn register(&self, request: RegisterBondRequest) -> Result<RegisterBondResponse, Error> {
        let record = self.register_bond(&request).await?;
        Ok(RegisterBondResponse {
            bond: BondPayload::from(&record),
        })
    }
}

/// Listing service implementing [`BondQuery`].
pub struct BondQueryService<R: ?Sized> {
    bonds: Arc<R>,
}

impl<R: ?Sized> Clone for BondQueryService<R> {
    fn clone(&self) -> Self {
        Self {
            bonds: Arc::clone(&self.bonds),
        }
    }
}

impl<R: ?Sized> BondQueryService<R> {
    /// Create a listing service over the bond repository.
    pub fn new(bonds: Arc<R>) -> Self {
        Self { bonds }
    }
}

#[async_trait]
impl<R> BondQuery for BondQueryService<R>
where
    R: BondRepository + ?Sized,
{
    async fn list(&self, request: ListBondsRequest) -> Result<ListBondsResponse, Error> {
        let filter = match request.legal_name.as_deref().map(LegalName::new) {
            None | Some(Err(LegalNameError::Empty)) => None,
            Some(Ok(name)) => Some(name),
            // No stored name can exceed the limit.
            Some(Err(LegalNameError::TooLong { .. })) => return Ok(ListBondsResponse::default()),
        };

        let records = self
            .bonds
            .list_by_owner(request.owner, filter)
            .await
            .map_err(map_repository_error)?;

        Ok(ListBondsResponse {
            bonds: records.iter().map(BondPayload::from).collect(),
        })
    }
}

#[cfg(test)]
#[path = "bond_service_tests.rs"]
mod tests;
