//! Reqwest-backed LEI registry adapter.
//!
//! Owns transport details only: request construction, timeout and status
//! mapping, and JSON decoding. Whitespace normalisation of the returned name
//! happens in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{LeiRecordDto, MissingName, first_legal_name};
use crate::domain::Lei;
use crate::domain::ports::{LeiLookupError, LeiRecordSource};

const DEFAULT_USER_AGENT: &str = concat!("bondbook/", env!("CARGO_PKG_VERSION"));

/// LEI registry client issuing `GET <endpoint>?lei=<code>`.
pub struct LeiHttpSource {
    client: Client,
    endpoint: Url,
}

impl LeiHttpSource {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(endpoint, timeout, DEFAULT_USER_AGENT)
    }

    /// Build a client sending `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_user_agent(
        endpoint: Url,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoint })
    }

    fn request_url(&self, lei: &Lei) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("lei", lei.as_str());
        url
    }
}

#[async_trait]
impl LeiRecordSource for LeiHttpSource {
    async fn legal_name(&self, lei: &Lei) -> Result<String, LeiLookupError> {
        let url = self.request_url(lei);
        debug!(%url, "querying lei registry");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_legal_name(lei, body.as_ref())
    }
}

fn parse_legal_name(lei: &Lei, body: &[u8]) -> Result<String, LeiLookupError> {
    let records: Vec<LeiRecordDto> = serde_json::from_slice(body).map_err(|error| {
        LeiLookupError::decode(format!("invalid registry JSON payload: {error}"))
    })?;
    first_legal_name(records).map_err(|missing| {
        debug!(%lei, ?missing, "registry response carried no legal name");
        LeiLookupError::not_found(lei.as_str())
    })
}

fn map_transport_error(error: reqwest::Error) -> LeiLookupError {
    if error.is_timeout() {
        LeiLookupError::timeout(error.to_string())
    } else {
        LeiLookupError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LeiLookupError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            LeiLookupError::timeout(format!("status {}", status.as_u16()))
        }
        _ => LeiLookupError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lei() -> Lei {
        Lei::new("5493001KJTIIGC8Y1R12").expect("valid lei")
    }

    #[rstest]
    fn request_url_appends_the_lei_query_parameter() {
        let endpoint = Url::parse("https://registry.test/api/v2/leirecords").expect("url");
        let source = LeiHttpSource::new(endpoint, Duration::from_secs(1)).expect("client");
        assert_eq!(
            source.request_url(&lei()).as_str(),
            "https://registry.test/api/v2/leirecords?lei=5493001KJTIIGC8Y1R12"
        );
    }

    #[rstest]
    fn parses_the_first_records_legal_name() {
        let body = r#"[
            {"Entity": {"LegalName": {"$": "Example Corp"}}},
            {"Entity": {"LegalName": {"$": "Ignored Ltd"}}}
        ]"#;
        let name = parse_legal_name(&lei(), body.as_bytes()).expect("name");
        assert_eq!(name, "Example Corp");
    }

    #[rstest]
    #[case("[]")]
    #[case(r#"[{"Entity": {}}]"#)]
    #[case(r#"[{"Entity": {"LegalName": {}}}]"#)]
    #[case(r#"[{"LEI": {"$": "5493001KJTIIGC8Y1R12"}}]"#)]
    fn missing_names_are_not_found(#[case] body: &str) {
        let error = parse_legal_name(&lei(), body.as_bytes()).expect_err("no name");
        assert!(matches!(error, LeiLookupError::NotFound { .. }));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"Entity": {"LegalName": {"$": "Object Not Array"}}}"#)]
    fn malformed_bodies_are_decode_errors(#[case] body: &str) {
        let error = parse_legal_name(&lei(), body.as_bytes()).expect_err("bad body");
        assert!(matches!(error, LeiLookupError::Decode { .. }));
    }

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT, "timeout")]
    #[case(StatusCode::NOT_FOUND, "status")]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, "status")]
    fn statuses_map_to_lookup_kinds(#[case] status: StatusCode, #[case] kind: &str) {
        assert_eq!(map_status_error(status, b"{\"error\": \"down\"}").kind(), kind);
    }

    #[rstest]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
