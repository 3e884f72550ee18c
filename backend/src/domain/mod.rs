//! Domain primitives, use cases, and ports.
//!
//! Purpose: define strongly typed accounts and bond records, the services that
//! create and read them, and the ports adapters implement. Nothing here knows
//! about HTTP, SQL, or the LEI registry wire format.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Account, Username, PasswordHash: registered credentials.
//! - BondRecord and its value types (Isin, Lei, CurrencyCode, Notional,
//!   LegalName).
//! - CredentialService, BondCommandService, BondQueryService: use cases.

pub mod account;
pub mod auth;
pub mod bond;
pub mod bond_service;
pub mod credential_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::account::{
    Account, AccountId, AccountValidationError, PasswordHash, USERNAME_MAX, Username,
};
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::bond::{
    BondId, BondRecord, BondTerms, BondValidationError, CurrencyCode, Isin, LEGAL_NAME_MAX, Lei,
    LegalName, LegalNameError, Notional, parse_maturity,
};
pub use self::bond_service::{BondCommandService, BondQueryService, BondRegistrationError};
pub use self::credential_service::{CredentialService, SignupError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use bondbook::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("invalid credentials"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
