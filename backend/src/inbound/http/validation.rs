//! Shared validation helpers for inbound HTTP adapters.

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("{} is required", field.as_str())).with_details(json!({
        "field": field.as_str(),
        "code": "missing_field",
    }))
}

/// Return the value or a `missing_field` error naming `field`.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(format!("invalid JSON body: {err}"))
        .with_details(json!({ "code": "validation_error", "field": "body" }))
        .into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    Error::invalid_request(format!("invalid query string: {err}"))
        .with_details(json!({ "code": "validation_error", "field": "query" }))
        .into()
}

/// JSON extractor configuration mapping decode failures onto the domain
/// error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Query extractor configuration mapping decode failures onto the domain
/// error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(Some("alice"), true)]
    #[case(None, false)]
    fn require_reports_missing_fields(#[case] value: Option<&str>, #[case] present: bool) {
        let result = require(value, FieldName::new("username"));
        assert_eq!(result.is_ok(), present);
        if let Err(error) = result {
            assert_eq!(error.code(), ErrorCode::InvalidRequest);
            let details = error.details().expect("details");
            assert_eq!(details["code"], "missing_field");
            assert_eq!(details["field"], "username");
        }
    }
}
