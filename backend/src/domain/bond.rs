//! Bond records and the validated value types they are built from.
//!
//! Raw request strings are parsed into [`BondTerms`]. The derived
//! [`LegalName`] is produced from registry output.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::AccountId;

/// Maximum ISIN length.
pub const ISIN_MAX: usize = 12;
/// Maximum LEI length.
pub const LEI_MAX: usize = 20;
/// Maximum stored legal-name length.
pub const LEGAL_NAME_MAX: usize = 100;
/// Fractional digits kept for notional sizes.
pub const NOTIONAL_SCALE: u32 = 2;
/// Exclusive upper bound of a notional, matching `NUMERIC(10,2)`.
const NOTIONAL_LIMIT: i64 = 100_000_000;

/// Field-level validation failures for bond input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BondValidationError {
    #[error("isin must be 1 to {ISIN_MAX} ASCII letters or digits")]
    InvalidIsin,
    #[error("lei must be 1 to {LEI_MAX} ASCII letters or digits")]
    InvalidLei,
    #[error("currency must be a three-letter code")]
    InvalidCurrency,
    #[error("size {reason}")]
    InvalidSize { reason: String },
    #[error("maturity must be an ISO-8601 calendar date (YYYY-MM-DD)")]
    InvalidMaturity,
}

impl BondValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidIsin => "isin",
            Self::InvalidLei => "lei",
            Self::InvalidCurrency => "currency",
            Self::InvalidSize { .. } => "size",
            Self::InvalidMaturity => "maturity",
        }
    }

    fn invalid_size(reason: impl Into<String>) -> Self {
        Self::InvalidSize {
            reason: reason.into(),
        }
    }
}

/// Failures producing a [`LegalName`] from registry output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LegalNameError {
    #[error("legal name is empty once whitespace is removed")]
    Empty,
    #[error("legal name exceeds {max} characters once whitespace is removed")]
    TooLong { max: usize },
}

fn is_bounded_alphanumeric(raw: &str, max: usize) -> bool {
    !raw.is_empty() && raw.len() <= max && raw.chars().all(|c| c.is_ascii_alphanumeric())
}

macro_rules! string_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value! {
    /// International Securities Identification Number.
    Isin
}

string_value! {
    /// Legal Entity Identifier.
    Lei
}

string_value! {
    /// Three-letter currency code, stored upper-case.
    CurrencyCode
}

string_value! {
    /// Registered entity name with every whitespace character removed.
    LegalName
}

impl Isin {
    /// Validate and construct an ISIN.
    ///
    /// # Examples
    /// ```
    /// use bondbook::domain::Isin;
    ///
    /// assert!(Isin::new("US1234567890").is_ok());
    /// assert!(Isin::new("US-123").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, BondValidationError> {
        if is_bounded_alphanumeric(raw, ISIN_MAX) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(BondValidationError::InvalidIsin)
        }
    }
}

impl Lei {
    /// Validate and construct an LEI.
    pub fn new(raw: &str) -> Result<Self, BondValidationError> {
        if is_bounded_alphanumeric(raw, LEI_MAX) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(BondValidationError::InvalidLei)
        }
    }
}

impl CurrencyCode {
    /// Validate a three-letter code, normalising it to upper case.
    pub fn new(raw: &str) -> Result<Self, BondValidationError> {
        if raw.len() == 3 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(raw.to_ascii_uppercase()))
        } else {
            Err(BondValidationError::InvalidCurrency)
        }
    }
}

impl LegalName {
    /// Strip all whitespace from a registry-supplied name.
    ///
    /// # Examples
    /// ```
    /// use bondbook::domain::LegalName;
    ///
    /// let name = LegalName::from_registry("Example Corp").unwrap();
    /// assert_eq!(name.as_str(), "ExampleCorp");
    /// ```
    pub fn from_registry(raw: &str) -> Result<Self, LegalNameError> {
        let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        Self::new(stripped)
    }

    /// Validate an already-stripped name, e.g. a filter or a stored row.
    pub fn new(stripped: impl Into<String>) -> Result<Self, LegalNameError> {
        let stripped = stripped.into();
        if stripped.is_empty() {
            return Err(LegalNameError::Empty);
        }
        if stripped.chars().count() > LEGAL_NAME_MAX {
            return Err(LegalNameError::TooLong {
                max: LEGAL_NAME_MAX,
            });
        }
        Ok(Self(stripped))
    }
}

/// Positive notional size with exactly two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Notional(Decimal);

impl Notional {
    /// Validate a decimal amount.
    pub fn new(value: Decimal) -> Result<Self, BondValidationError> {
        if value <= Decimal::ZERO {
            return Err(BondValidationError::invalid_size("must be greater than zero"));
        }
        if value.normalize().scale() > NOTIONAL_SCALE {
            return Err(BondValidationError::invalid_size(
                "must have at most two fractional digits",
            ));
        }
        if value >= Decimal::from(NOTIONAL_LIMIT) {
            return Err(BondValidationError::invalid_size(
                "must be below 100000000.00",
            ));
        }
        let mut scaled = value;
        scaled.rescale(NOTIONAL_SCALE);
        Ok(Self(scaled))
    }

    /// Underlying fixed-point value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Notional {
    type Err = BondValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(raw.trim())
            .map_err(|_| BondValidationError::invalid_size("must be a decimal number"))?;
        Self::new(value)
    }
}

impl fmt::Display for Notional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse an ISO-8601 calendar date.
pub fn parse_maturity(raw: &str) -> Result<NaiveDate, BondValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| BondValidationError::InvalidMaturity)
}

/// Validated user-supplied bond terms, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondTerms {
    pub isin: Isin,
    pub lei: Lei,
    pub notional: Notional,
    pub currency: CurrencyCode,
    pub maturity: NaiveDate,
}

impl BondTerms {
    /// Parse raw request fields. Identifier shapes are checked before the
    /// size and maturity are parsed; the first failure is returned.
    pub fn parse(
        isin: &str,
        lei: &str,
        size: &str,
        currency: &str,
        maturity: &str,
    ) -> Result<Self, BondValidationError> {
        let isin = Isin::new(isin)?;
        let lei = Lei::new(lei)?;
        let currency = CurrencyCode::new(currency)?;
        let notional = size.parse()?;
        let maturity = parse_maturity(maturity)?;
        Ok(Self {
            isin,
            lei,
            notional,
            currency,
            maturity,
        })
    }
}

/// Stable bond record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BondId(Uuid);

impl BondId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Persisted bond record owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondRecord {
    pub id: BondId,
    pub owner: AccountId,
    pub isin: Isin,
    pub notional: Notional,
    pub currency: CurrencyCode,
    pub maturity: NaiveDate,
    pub lei: Lei,
    pub legal_name: LegalName,
}

impl BondRecord {
    /// Build a new record from validated terms and the enriched legal name.
    pub fn from_terms(owner: AccountId, terms: BondTerms, legal_name: LegalName) -> Self {
        let BondTerms {
            isin,
            lei,
            notional,
            currency,
            maturity,
        } = terms;
        Self {
            id: BondId::random(),
            owner,
            isin,
            notional,
            currency,
            maturity,
            lei,
            legal_name,
        }
    }
}
