//! Access gate for bond endpoints.
//!
//! [`require_basic_auth`] is request middleware: it parses the
//! `Authorization: Basic` header and verifies it against the credential store
//! before routing reaches any handler, so no body or query extraction happens
//! for unauthenticated callers. The verified caller is stored in the request
//! extensions and read back through the [`AuthenticatedAccount`] extractor.
//! Every rejection produces the same `401` so callers cannot tell unknown
//! usernames from wrong passwords.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderMap};
use actix_web::middleware::Next;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{Ready, ready};
use serde_json::json;
use tracing::debug;

use crate::domain::{AccountId, Credentials, Error};
use crate::inbound::http::state::HttpState;

/// Reasons a Basic `Authorization` header could not be turned into
/// credentials. Only logged; callers see a uniform rejection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum BasicAuthError {
    #[error("authorization header is missing")]
    Missing,
    #[error("authorization header is not valid ASCII")]
    NotAscii,
    #[error("authorization scheme is not Basic")]
    WrongScheme,
    #[error("basic credentials are not valid base64")]
    Encoding,
    #[error("basic credentials are not valid UTF-8")]
    NotUtf8,
    #[error("basic credentials lack a ':' separator")]
    MissingSeparator,
    #[error("basic credentials are blank")]
    Blank,
}

/// Parse the `Authorization` header into credentials.
///
/// The scheme is matched case-insensitively and the decoded token is split at
/// its first `:`, so passwords may contain colons.
pub(crate) fn basic_credentials(headers: &HeaderMap) -> Result<Credentials, BasicAuthError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .ok_or(BasicAuthError::Missing)?
        .to_str()
        .map_err(|_| BasicAuthError::NotAscii)?;
    let (scheme, token) = raw
        .trim()
        .split_once(' ')
        .ok_or(BasicAuthError::WrongScheme)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(BasicAuthError::WrongScheme);
    }
    let decoded = STANDARD
        .decode(token.trim())
        .map_err(|_| BasicAuthError::Encoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::NotUtf8)?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or(BasicAuthError::MissingSeparator)?;
    Credentials::try_from_parts(username, password).map_err(|_| BasicAuthError::Blank)
}

fn unauthenticated() -> Error {
    Error::unauthorized("authentication required")
        .with_details(json!({ "code": "unauthenticated" }))
}

/// Identity of the caller, resolved by the access gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    id: AccountId,
    username: String,
}

impl AuthenticatedAccount {
    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

async fn authenticate(req: &HttpRequest) -> Result<AuthenticatedAccount, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    let credentials = basic_credentials(req.headers()).map_err(|reason| {
        debug!(%reason, "rejected authorization header");
        unauthenticated()
    })?;
    match state.credentials.verify(&credentials).await? {
        Some(account) => Ok(AuthenticatedAccount {
            id: account.id(),
            username: account.username().to_string(),
        }),
        None => Err(unauthenticated()),
    }
}

/// Middleware guarding routes behind HTTP Basic credentials.
///
/// Wrap a resource or scope with `actix_web::middleware::from_fn(require_basic_auth)`.
/// Rejections are rendered here, so the wrapped handler never runs.
pub async fn require_basic_auth<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let outcome = authenticate(req.request()).await;
    match outcome {
        Ok(account) => {
            req.extensions_mut().insert(account);
            next.call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        }
        Err(error) => Ok(req.error_response(error).map_into_right_body()),
    }
}

impl FromRequest for AuthenticatedAccount {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    /// Read the caller bound by [`require_basic_auth`]. Routes that are not
    /// wrapped by the gate always reject.
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Self>()
                .cloned()
                .ok_or_else(unauthenticated),
        )
    }
}
