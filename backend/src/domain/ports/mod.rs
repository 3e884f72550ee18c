//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`CredentialStore`, `BondCommand`, `BondQuery`) are called by
//! inbound adapters. Driven ports (`AccountRepository`, `BondRepository`,
//! `LeiRecordSource`, `PasswordHasher`) are implemented by outbound adapters
//! and expose typed errors instead of opaque ones.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod bond_command;
mod bond_query;
mod bond_repository;
mod credential_store;
mod lei_record_source;
mod password_hasher;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use bond_command::MockBondCommand;
pub use bond_command::{BondCommand, BondPayload, RegisterBondRequest, RegisterBondResponse};
#[cfg(test)]
pub use bond_query::MockBondQuery;
pub use bond_query::{BondQuery, ListBondsRequest, ListBondsResponse};
#[cfg(test)]
pub use bond_repository::MockBondRepository;
pub use bond_repository::{BondRepository, BondRepositoryError};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::CredentialStore;
#[cfg(test)]
pub use lei_record_source::MockLeiRecordSource;
pub use lei_record_source::{LeiLookupError, LeiRecordSource};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
