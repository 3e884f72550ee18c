//! Driven port resolving legal entity names from an LEI registry.

use async_trait::async_trait;

use crate::domain::Lei;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while resolving an LEI.
    pub enum LeiLookupError {
        /// Network transport failed before receiving a response.
        Transport { message: String } => "lei registry transport failed: {message}",
        /// The registry call exceeded its timeout.
        Timeout { message: String } => "lei registry timeout: {message}",
        /// The registry answered with a non-success status.
        Status { status: u16, message: String } =>
            "lei registry returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "lei registry response decode failed: {message}",
        /// The registry holds no usable name for the code.
        NotFound { lei: String } => "lei registry has no legal name for {lei}",
    }
}

impl LeiLookupError {
    /// Short machine-readable kind used in logs and error details.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::NotFound { .. } => "not_found",
        }
    }
}

/// Port for looking up the registered legal name of an entity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeiRecordSource: Send + Sync {
    /// Return the raw legal name recorded for `lei`.
    ///
    /// Whitespace normalisation is the caller's concern; adapters return the
    /// registry value untouched.
    async fn legal_name(&self, lei: &Lei) -> Result<String, LeiLookupError>;
}
