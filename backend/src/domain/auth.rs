//! Authentication primitives such as account credentials.
//!
//! Inbound adapters parse raw strings into [`Credentials`] before they talk to
//! the credential store, so blank inputs never reach a port.

use std::fmt;

use zeroize::Zeroizing;

/// Validation failures for raw credential input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was missing or blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was missing or empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl CredentialsValidationError {
    /// Name of the offending input field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

/// Username and password pair presented by a caller.
///
/// ## Invariants
/// - `username` is non-blank and kept exactly as supplied; lookups are
///   case-sensitive.
/// - `password` is non-empty and zeroised on drop.
///
/// # Examples
/// ```
/// use bondbook::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("alice", "pw123").unwrap();
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        if username.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Construct credentials from optional inputs, treating `None` as blank.
    pub fn try_from_optional(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let username = username.ok_or(CredentialsValidationError::EmptyUsername)?;
        let password = password.ok_or(CredentialsValidationError::EmptyPassword)?;
        Self::try_from_parts(username, password)
    }

    /// Username as supplied.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Raw password as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
